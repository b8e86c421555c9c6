use clap::ValueEnum;

/// Models accepted by the completion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Model {
    /// Best overall accuracy across summary, sentiment, and characters
    #[default]
    #[value(name = "llama3-70b-8192")]
    Llama3_70b,
    #[value(name = "mixtral-8x7b-32768")]
    Mixtral8x7b,
    #[value(name = "gemma2-9b-it")]
    Gemma2_9b,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Llama3_70b, Model::Mixtral8x7b, Model::Gemma2_9b];

    /// Model identifier as sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Llama3_70b => "llama3-70b-8192",
            Model::Mixtral8x7b => "mixtral-8x7b-32768",
            Model::Gemma2_9b => "gemma2-9b-it",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|model| model.as_str() == name)
    }

    pub fn is_recommended(&self) -> bool {
        *self == Model::default()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
