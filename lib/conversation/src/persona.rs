//! Fixed texts that give the assistant its voice.

/// The assistant's name, stock replies and suggested questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Display name shown in the widget header.
    pub name: String,
    /// First message of every conversation.
    pub greeting: String,
    /// Instruction sent ahead of the history to the generation service.
    pub system_instruction: String,
    /// Reply used when the generation service fails.
    pub apology: String,
    /// Reply used offline when nothing in the fallback table matches.
    pub clarification: String,
    /// Questions the widget offers as one-click suggestions.
    pub example_prompts: Vec<String>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "SoftBot".to_string(),
            greeting: "Hi there! I'm SoftBot, your virtual assistant. How can I help you with selling your software licenses today?".to_string(),
            system_instruction: "You are SoftBot, a helpful assistant for SoftSell, a company that helps businesses sell their unused software licenses. \
                Be concise, friendly, and informative. Focus on helping users understand how to sell their licenses, \
                what types of licenses we accept, and the process involved. If you don't know something specific about \
                SoftSell's operations, suggest they contact our team through the contact form.".to_string(),
            apology: "I'm having trouble connecting to my knowledge base right now. For immediate assistance, please use our contact form or try asking one of the common questions below.".to_string(),
            clarification: "I'm here to help with any questions about selling your software licenses. Could you provide more details about what you'd like to know?".to_string(),
            example_prompts: [
                "How do I sell my license?",
                "What licenses do you accept?",
                "How much is my license worth?",
                "How long does it take?",
                "Is this legal?",
                "How do I get paid?",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Persona {
    /// Header label; marks the assistant when replies may be generated.
    #[must_use]
    pub fn label(&self, generation_enabled: bool) -> String {
        if generation_enabled {
            format!("{} (AI)", self.name)
        } else {
            self.name.clone()
        }
    }
}
