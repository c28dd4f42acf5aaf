//! Static keyword tables.
//!
//! Lookup is plain substring containment against the lowercased utterance,
//! scanned in table order; the first hit wins. Tables are built once and
//! never change afterwards.

/// One trigger phrase and its canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    trigger: String,
    response: String,
}

impl KnowledgeEntry {
    /// Creates an entry. The trigger is stored lowercased.
    #[must_use]
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into().to_lowercase(),
            response: response.into(),
        }
    }

    /// Returns the lowercased trigger phrase.
    #[must_use]
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Returns the canned answer.
    #[must_use]
    pub fn response(&self) -> &str {
        &self.response
    }
}

/// An ordered trigger-phrase table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeTable {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeTable {
    /// Builds a table from `(trigger, response)` pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<T, R>(pairs: impl IntoIterator<Item = (T, R)>) -> Self
    where
        T: Into<String>,
        R: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(trigger, response)| KnowledgeEntry::new(trigger, response))
                .collect(),
        }
    }

    /// The domain FAQ, consulted before anything else.
    #[must_use]
    pub fn faq() -> Self {
        Self::from_pairs([
            (
                "how do i sell my license",
                "To sell your license, simply fill out our contact form with details about your software license. Our team will evaluate it and provide you with a quote within 24 hours.",
            ),
            (
                "what licenses do you accept",
                "We accept licenses from major vendors including Microsoft, Adobe, Oracle, Autodesk, VMware, and many others. If you have a specific license type, please contact us for confirmation.",
            ),
            (
                "how much is my license worth",
                "The value of your license depends on several factors including the software type, version, remaining subscription period, and current market demand. Submit your license details for a free valuation.",
            ),
            (
                "how long does it take",
                "Our process is quick! You will receive a valuation within 24 hours, and once you accept our offer, payment is typically processed within 3 business days.",
            ),
            (
                "is this legal",
                "Yes, our process is completely legal. We ensure all license transfers comply with vendor terms and conditions and are properly documented.",
            ),
            (
                "how do i get paid",
                "We offer multiple payment options including bank transfer, PayPal, and cryptocurrency. You can select your preferred method when accepting our offer.",
            ),
            (
                "what information do you need",
                "We need details about your software license including the vendor, product name, version, license type (perpetual or subscription), and remaining term if applicable.",
            ),
        ])
    }

    /// The offline table, used only when no generation service is configured.
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_pairs([
            (
                "license",
                "Our license selling process is simple and secure. We evaluate your software licenses and provide competitive offers based on current market value.",
            ),
            (
                "payment",
                "We offer multiple payment methods including bank transfers, PayPal, and cryptocurrency. Payments are typically processed within 3 business days after the license transfer is complete.",
            ),
            (
                "process",
                "Our process involves 4 simple steps: 1) Submit your license details, 2) Receive a valuation, 3) Accept our offer, 4) Complete the transfer and receive payment.",
            ),
            (
                "legal",
                "Yes, selling unused software licenses is completely legal as long as it complies with the vendor's license agreement. We ensure all transfers are properly documented and compliant.",
            ),
            (
                "time",
                "The entire process typically takes 3-5 business days from submission to payment, though this can vary depending on the license type and vendor.",
            ),
        ])
    }

    /// Returns the answer of the first entry whose trigger occurs in
    /// `utterance`, ignoring case.
    #[must_use]
    pub fn lookup(&self, utterance: &str) -> Option<&str> {
        let normalized = utterance.to_lowercase();
        self.entries
            .iter()
            .find(|entry| normalized.contains(entry.trigger.as_str()))
            .map(KnowledgeEntry::response)
    }

    /// Returns the entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }
}

/// A group of patterns sharing one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SmallTalkRule {
    patterns: Vec<String>,
    reply: &'static str,
}

impl SmallTalkRule {
    /// Patterns are stored lowercased, like knowledge triggers.
    fn new(patterns: &[&str], reply: &'static str) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
            reply,
        }
    }
}

/// Greeting, thanks and farewell patterns, checked in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmallTalk {
    rules: Vec<SmallTalkRule>,
}

impl Default for SmallTalk {
    fn default() -> Self {
        Self {
            rules: vec![
                SmallTalkRule::new(
                    &["hello", "hi"],
                    "Hello! How can I help you with selling your software licenses today?",
                ),
                SmallTalkRule::new(
                    &["thank"],
                    "You're welcome! Is there anything else I can help you with?",
                ),
                SmallTalkRule::new(
                    &["bye"],
                    "Goodbye! Feel free to come back if you have more questions.",
                ),
            ],
        }
    }
}

impl SmallTalk {
    /// Returns the reply for the first rule with a pattern in `utterance`.
    ///
    /// Matching is substring-based, so "something" counts as a greeting.
    #[must_use]
    pub fn lookup(&self, utterance: &str) -> Option<&'static str> {
        let normalized = utterance.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| normalized.contains(p)))
            .map(|rule| rule.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_lookup_ignores_case() {
        let faq = KnowledgeTable::faq();
        let upper = faq.lookup("HOW MUCH IS MY LICENSE WORTH?");
        let lower = faq.lookup("how much is my license worth?");
        assert!(upper.is_some());
        assert_eq!(upper, lower);
    }

    #[test]
    fn first_entry_in_order_wins() {
        let table =
            KnowledgeTable::from_pairs([("license", "first"), ("sell my license", "second")]);
        assert_eq!(table.lookup("can I sell my license?"), Some("first"));
    }

    #[test]
    fn fallback_keeps_table_order() {
        let fallback = KnowledgeTable::fallback();
        let triggers: Vec<&str> = fallback
            .entries()
            .iter()
            .map(KnowledgeEntry::trigger)
            .collect();
        assert_eq!(triggers, vec!["license", "payment", "process", "legal", "time"]);
        // "license" precedes "payment"
        assert!(
            fallback
                .lookup("license payment options")
                .is_some_and(|r| r.starts_with("Our license selling process"))
        );
    }

    #[test]
    fn no_match_returns_none() {
        assert!(KnowledgeTable::faq().lookup("what is the weather").is_none());
        assert!(KnowledgeTable::fallback().lookup("what is the weather").is_none());
    }

    #[test]
    fn triggers_are_stored_lowercase() {
        let entry = KnowledgeEntry::new("Is This Legal", "Yes.");
        assert_eq!(entry.trigger(), "is this legal");
    }

    #[test]
    fn small_talk_priority() {
        let small_talk = SmallTalk::default();
        let starts_with = |utterance: &str, prefix: &str| {
            small_talk
                .lookup(utterance)
                .is_some_and(|r| r.starts_with(prefix))
        };
        assert!(starts_with("Hello there", "Hello!"));
        assert!(starts_with("thanks a lot", "You're welcome"));
        assert!(starts_with("ok bye", "Goodbye"));
        // greeting outranks thanks
        assert!(starts_with("hi, thank you", "Hello!"));
        assert!(small_talk.lookup("what is the weather").is_none());
    }

    #[test]
    fn small_talk_matches_substrings() {
        assert!(SmallTalk::default().lookup("something else").is_some());
    }

    #[test]
    fn small_talk_patterns_ignore_case() {
        let small_talk = SmallTalk {
            rules: vec![SmallTalkRule::new(&["Howdy"], "Howdy, partner!")],
        };
        assert_eq!(small_talk.lookup("HOWDY there"), Some("Howdy, partner!"));
        assert_eq!(small_talk.lookup("howdy"), Some("Howdy, partner!"));
    }
}
