//! User-visible text in the conversation's working language.
//!
//! Everything the dialogue loop, the chart renderer and the terminal surface
//! show to a person goes through [`Language`], so switching languages switches
//! the analysis command, the chart captions and the error texts together.

use crate::analysis::{AnalysisError, WordFrequencyEntry};
use crate::error::ChatlensError;
use std::fmt::Write as _;
use std::str::FromStr;

/// Working language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl Language {
    /// The single in-band command that triggers conversation analysis.
    pub fn analysis_command(&self) -> &'static str {
        match self {
            Language::Korean => "/분석",
            Language::English => "/analyze",
        }
    }

    pub fn analysis_error(&self, err: &AnalysisError) -> String {
        match (self, err) {
            (Language::Korean, AnalysisError::EmptyConversation) => {
                "분석할 대화 내용이 없습니다.".to_string()
            }
            (Language::Korean, AnalysisError::NoSignificantWords) => {
                "분석할 유의미한 단어가 없습니다.".to_string()
            }
            (Language::Korean, AnalysisError::Chart(reason)) => {
                format!("차트를 그리지 못했습니다: {}", reason)
            }
            (Language::English, err) => err.to_string(),
        }
    }

    /// Text of the assistant turn recorded when a completion request fails.
    pub fn service_error(&self, err: &ChatlensError) -> String {
        match self {
            Language::Korean => format!("오류가 발생했습니다: {}", err),
            Language::English => format!("An error occurred: {}", err),
        }
    }

    /// Textual summary attached to an analysis turn.
    pub fn analysis_summary(&self, ranking: &[WordFrequencyEntry]) -> String {
        let mut summary = match self {
            Language::Korean => "📊 **대화 분석 결과**\n\n가장 많이 사용된 단어 TOP 10:\n".to_string(),
            Language::English => "📊 **Conversation analysis**\n\nTop 10 most used words:\n".to_string(),
        };

        for (rank, entry) in ranking.iter().enumerate() {
            let _ = match self {
                Language::Korean => {
                    writeln!(summary, "{}. **{}** ({}회)", rank + 1, entry.token, entry.count)
                }
                Language::English => {
                    writeln!(summary, "{}. **{}** ({} times)", rank + 1, entry.token, entry.count)
                }
            };
        }

        summary
    }

    pub fn chart_title(&self) -> &'static str {
        match self {
            Language::Korean => "대화에서 가장 많이 사용된 단어 TOP 10",
            Language::English => "Top 10 most used words in the conversation",
        }
    }

    pub fn chart_x_label(&self) -> &'static str {
        match self {
            Language::Korean => "단어",
            Language::English => "Word",
        }
    }

    pub fn chart_y_label(&self) -> &'static str {
        match self {
            Language::Korean => "빈도",
            Language::English => "Frequency",
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            Language::Korean => "💬 대화분석 챗봇 💬",
            Language::English => "💬 Conversation analysis chatbot 💬",
        }
    }

    pub fn usage(&self) -> String {
        let command = self.analysis_command();
        match self {
            Language::Korean => format!(
                "1. 평소처럼 챗봇과 대화하세요\n\
                 2. 대화 중 언제든지 {command} 을 입력하면 지금까지의 대화를 분석합니다\n\
                 3. 가장 많이 사용된 단어 10개가 차트로 저장됩니다\n\
                 :clear 로 대화 기록을 삭제하고 :quit 로 종료합니다"
            ),
            Language::English => format!(
                "1. Chat with the assistant as usual\n\
                 2. Type {command} at any time to analyze the conversation so far\n\
                 3. The 10 most used words are saved as a chart\n\
                 Use :clear to delete the history and :quit to exit"
            ),
        }
    }

    pub fn input_prompt(&self) -> &'static str {
        match self {
            Language::Korean => "나: ",
            Language::English => "You: ",
        }
    }

    pub fn assistant_label(&self) -> &'static str {
        match self {
            Language::Korean => "AI: ",
            Language::English => "Assistant: ",
        }
    }

    pub fn credential_prompt(&self) -> &'static str {
        match self {
            Language::Korean => "OpenAI API 키를 입력하여 시작하세요: ",
            Language::English => "Enter your OpenAI API key to start: ",
        }
    }

    pub fn chart_saved(&self, path: &str) -> String {
        match self {
            Language::Korean => format!("차트 저장됨: {}", path),
            Language::English => format!("Chart saved to {}", path),
        }
    }

    pub fn chart_save_failed(&self, path: &str, err: &ChatlensError) -> String {
        match self {
            Language::Korean => format!("차트를 저장하지 못했습니다 ({}): {}", path, err),
            Language::English => format!("Could not save chart to {}: {}", path, err),
        }
    }

    pub fn history_cleared(&self) -> &'static str {
        match self {
            Language::Korean => "대화 기록을 삭제했습니다.",
            Language::English => "Conversation history deleted.",
        }
    }

    pub fn stats_header(&self) -> &'static str {
        match self {
            Language::Korean => "📈 대화 통계",
            Language::English => "📈 Conversation stats",
        }
    }

    pub fn stats_labels(&self) -> [&'static str; 3] {
        match self {
            Language::Korean => ["사용자 메시지", "AI 응답", "총 대화 수"],
            Language::English => ["User messages", "AI responses", "Total turns"],
        }
    }

    pub fn no_conversation_yet(&self) -> &'static str {
        match self {
            Language::Korean => "아직 대화가 없습니다.",
            Language::English => "No conversation yet.",
        }
    }

    pub fn goodbye(&self) -> &'static str {
        match self {
            Language::Korean => "안녕히 가세요!",
            Language::English => "Goodbye!",
        }
    }
}

impl FromStr for Language {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Language::Korean),
            "en" | "english" => Ok(Language::English),
            other => Err(ChatlensError::ConfigError(format!("unsupported language: {}", other))),
        }
    }
}
