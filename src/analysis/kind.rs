//! The three kinds of analysis and their prompt templates

use clap::ValueEnum;

/// Text returned in place of a prompt for an unrecognized analysis type
pub const INVALID_ANALYSIS_TYPE: &str = "Invalid analysis type";

const SUMMARY_INSTRUCTIONS: &str = "Provide a comprehensive plot summary of this text, \
detailing all main events in strict chronological order from start to finish. Ensure the \
summary flows smoothly, weaving key moments into a cohesive narrative with clear \
cause-and-effect connections. Begin with the story’s initial setup, progress through critical \
developments (including character actions, major deaths, conflicts, and pivotal incidents), \
and conclude with the final resolution, keeping it concise yet complete. Do not omit \
significant plot points, such as murders, betrayals, or shifts in power. After the summary. Limit the \
entire response to 500 words.";

const SENTIMENT_INSTRUCTIONS: &str = "Analyze the sentiment of this text based on its ending \
for the main character, not metadata or introductory notes. Focus on the emotional tone of the \
main character's ending (positive, negative, or neutral). If the main character’s ending is \
sad or tragic (e.g., contains 'death,' 'dies,' 'killed'), classify the sentiment as negative; \
if the main character's ending is happy life, love, romantic, marriage then classify the \
sentiment as positive; otherwise, use neutral if the tone is balanced or unclear.";

const CHARACTERS_INSTRUCTIONS: &str = "Identify all key characters in this text, excluding \
minor figures unless they significantly impact the plot. For each character, provide a concise \
one-liner description of their role or significance in the story, based on the narrative \
content, not metadata. Ensure the list is comprehensive and reflects the entire text.";

/// Kind of analysis requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AnalysisKind {
    #[default]
    Summary,
    Sentiment,
    Characters,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::Summary,
        AnalysisKind::Sentiment,
        AnalysisKind::Characters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Summary => "summary",
            AnalysisKind::Sentiment => "sentiment",
            AnalysisKind::Characters => "characters",
        }
    }

    /// Look up a kind by name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    fn instructions(&self) -> &'static str {
        match self {
            AnalysisKind::Summary => SUMMARY_INSTRUCTIONS,
            AnalysisKind::Sentiment => SENTIMENT_INSTRUCTIONS,
            AnalysisKind::Characters => CHARACTERS_INSTRUCTIONS,
        }
    }

    /// Build the full prompt around the condensed book text
    pub fn prompt(&self, condensed_text: &str) -> String {
        format!("{}\n\nText: {}", self.instructions(), condensed_text)
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
