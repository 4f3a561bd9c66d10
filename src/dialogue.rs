//! Dialogue loop: one handling cycle per submitted input.
//!
//! Input whose trimmed form equals the analysis command runs the analyzer;
//! anything else is chat, forwarded to the completion service with the
//! conversational history. Every failure becomes a visible assistant turn and
//! the session carries on.

use crate::analysis::{self, AnalysisError, ChartRenderer};
use crate::conversation::{Conversation, Message, SessionStats};
use crate::error::ChatlensError;
use crate::llm::LlmBroker;
use crate::locale::Language;
use crate::surface::Surface;
use futures::stream::StreamExt;
use tracing::{debug, info, warn};

/// What a handling cycle did.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Blank input; nothing happened.
    Ignored,
    Analyzed,
    AnalysisFailed(AnalysisError),
    Replied,
    ServiceFailed(ChatlensError),
}

pub struct Dialogue {
    conversation: Conversation,
    broker: LlmBroker,
    renderer: ChartRenderer,
    language: Language,
}

impl Dialogue {
    pub fn new(broker: LlmBroker, language: Language) -> Self {
        Self {
            conversation: Conversation::new(),
            broker,
            renderer: ChartRenderer::new(language),
            language,
        }
    }

    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn stats(&self) -> SessionStats {
        self.conversation.stats()
    }

    /// Reset the session. Unconditional; there is no undo.
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    pub fn is_analysis_command(&self, input: &str) -> bool {
        input.trim() == self.language.analysis_command()
    }

    pub async fn handle_input(&mut self, input: &str, surface: &mut dyn Surface) -> TurnOutcome {
        if input.trim().is_empty() {
            return TurnOutcome::Ignored;
        }

        if self.is_analysis_command(input) {
            self.run_analysis(surface)
        } else {
            self.run_chat(input, surface).await
        }
    }

    fn run_analysis(&mut self, surface: &mut dyn Surface) -> TurnOutcome {
        let result = analysis::analyze(self.conversation.conversational_contents())
            .and_then(|ranking| {
                let chart = self.renderer.render(&ranking)?;
                Ok((ranking, chart))
            });

        match result {
            Ok((ranking, chart)) => {
                info!(
                    session = %self.conversation.id(),
                    top = %ranking[0].token,
                    entries = ranking.len(),
                    "Conversation analyzed"
                );
                let summary = self.language.analysis_summary(&ranking);
                self.append(Message::analysis(summary, ranking, chart), surface);
                TurnOutcome::Analyzed
            }
            Err(err) => {
                debug!(session = %self.conversation.id(), error = %err, "Analysis produced no ranking");
                let text = format!("❌ {}", self.language.analysis_error(&err));
                self.append(Message::assistant(text), surface);
                TurnOutcome::AnalysisFailed(err)
            }
        }
    }

    async fn run_chat(&mut self, input: &str, surface: &mut dyn Surface) -> TurnOutcome {
        self.append(Message::user(input), surface);

        let history = self.conversation.llm_history();
        let mut reply = String::new();
        let mut failure = None;

        {
            let mut stream = self.broker.generate_stream(&history);
            surface.begin_stream();
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(text) => {
                        surface.render_chunk(&text);
                        reply.push_str(&text);
                    }
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            }
            surface.end_stream();
        }

        match failure {
            None => {
                debug!(session = %self.conversation.id(), chars = reply.chars().count(), "Reply complete");
                // Already shown chunk by chunk.
                self.conversation.push(Message::assistant(reply));
                TurnOutcome::Replied
            }
            Some(err) => {
                warn!(session = %self.conversation.id(), error = %err, "Completion failed");
                let text = self.language.service_error(&err);
                self.append(Message::assistant(text), surface);
                TurnOutcome::ServiceFailed(err)
            }
        }
    }

    fn append(&mut self, message: Message, surface: &mut dyn Surface) {
        surface.render_message(&message);
        self.conversation.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::llm::{CompletionConfig, CompletionStream, LlmGateway, LlmMessage, MessageRole};
    use futures::stream;
    use std::sync::{Arc, Mutex};

    enum Script {
        Reply(Vec<&'static str>),
        FailAfter(Vec<&'static str>, &'static str),
    }

    // Replays one script per request and records each request's history.
    struct ScriptedGateway {
        scripts: Mutex<Vec<Script>>,
        requests: Mutex<Vec<Vec<LlmMessage>>>,
    }

    impl ScriptedGateway {
        fn new(scripts: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(scripts),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl LlmGateway for ScriptedGateway {
        fn complete_stream<'a>(
            &'a self,
            _model: &'a str,
            messages: &'a [LlmMessage],
            _config: &'a CompletionConfig,
        ) -> CompletionStream<'a> {
            self.requests.lock().unwrap().push(messages.to_vec());

            let mut scripts = self.scripts.lock().unwrap();
            let script = if scripts.is_empty() {
                Script::Reply(vec!["default"])
            } else {
                scripts.remove(0)
            };

            let items: Vec<Result<String>> = match script {
                Script::Reply(chunks) => chunks.into_iter().map(|c| Ok(c.to_string())).collect(),
                Script::FailAfter(chunks, error) => chunks
                    .into_iter()
                    .map(|c| Ok(c.to_string()))
                    .chain(std::iter::once(Err(ChatlensError::ApiError(error.to_string()))))
                    .collect(),
            };
            Box::pin(stream::iter(items))
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        rendered: Vec<Message>,
        chunks: Vec<String>,
        streams_begun: usize,
        streams_ended: usize,
    }

    impl Surface for RecordingSurface {
        fn render_message(&mut self, message: &Message) {
            self.rendered.push(message.clone());
        }

        fn begin_stream(&mut self) {
            self.streams_begun += 1;
        }

        fn render_chunk(&mut self, chunk: &str) {
            self.chunks.push(chunk.to_string());
        }

        fn end_stream(&mut self) {
            self.streams_ended += 1;
        }
    }

    fn dialogue(gateway: Arc<ScriptedGateway>) -> Dialogue {
        Dialogue::new(LlmBroker::new("test-model", gateway), Language::Korean)
            .with_renderer(ChartRenderer::new(Language::Korean).with_size(640, 480))
    }

    fn last_text(dialogue: &Dialogue) -> String {
        dialogue
            .conversation()
            .last()
            .and_then(Message::conversational_content)
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_chat_appends_user_and_assembled_reply() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["안녕", "하세요"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        let outcome = dialogue.handle_input("반가워요", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::Replied));
        assert_eq!(dialogue.conversation().len(), 2);
        assert_eq!(dialogue.conversation().messages()[0].role(), Some(MessageRole::User));
        assert_eq!(last_text(&dialogue), "안녕하세요");
        assert_eq!(surface.chunks, vec!["안녕", "하세요"]);
        assert_eq!((surface.streams_begun, surface.streams_ended), (1, 1));
        // The streamed reply is not rendered a second time.
        assert_eq!(surface.rendered.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_sends_full_history() {
        let gateway = ScriptedGateway::new(vec![
            Script::Reply(vec!["first reply"]),
            Script::Reply(vec!["second reply"]),
        ]);
        let mut dialogue = dialogue(gateway.clone());
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("first", &mut surface).await;
        dialogue.handle_input("second", &mut surface).await;

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1],
            vec![
                LlmMessage::user("first"),
                LlmMessage::assistant("first reply"),
                LlmMessage::user("second"),
            ]
        );
    }

    #[tokio::test]
    async fn test_service_failure_appends_exactly_one_error_turn() {
        let gateway = ScriptedGateway::new(vec![Script::FailAfter(vec![], "invalid api key")]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        let outcome = dialogue.handle_input("hello", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::ServiceFailed(_)));
        // user turn + one error turn
        assert_eq!(dialogue.conversation().len(), 2);
        let error = last_text(&dialogue);
        assert!(error.starts_with("오류가 발생했습니다"));
        assert!(error.contains("invalid api key"));
        assert_eq!(
            dialogue.conversation().last().and_then(Message::role),
            Some(MessageRole::Assistant)
        );
    }

    #[tokio::test]
    async fn test_mid_stream_failure_discards_partial_reply() {
        let gateway = ScriptedGateway::new(vec![Script::FailAfter(vec!["partial"], "connection reset")]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("hello", &mut surface).await;

        assert_eq!(dialogue.conversation().len(), 2);
        assert!(!last_text(&dialogue).contains("partial"));
        assert_eq!(surface.streams_ended, 1);
    }

    #[tokio::test]
    async fn test_session_continues_after_failure() {
        let gateway = ScriptedGateway::new(vec![
            Script::FailAfter(vec![], "rate limited"),
            Script::Reply(vec!["ok now"]),
        ]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("one", &mut surface).await;
        let outcome = dialogue.handle_input("two", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::Replied));
        assert_eq!(dialogue.conversation().len(), 4);
        assert_eq!(last_text(&dialogue), "ok now");
    }

    #[tokio::test]
    async fn test_analysis_on_empty_session_reports_empty_conversation() {
        let gateway = ScriptedGateway::new(vec![]);
        let mut dialogue = dialogue(gateway.clone());
        let mut surface = RecordingSurface::default();

        let outcome = dialogue.handle_input("/분석", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::AnalysisFailed(AnalysisError::EmptyConversation)));
        assert_eq!(dialogue.conversation().len(), 1);
        assert_eq!(last_text(&dialogue), "❌ 분석할 대화 내용이 없습니다.");
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analysis_with_only_stopwords_reports_no_significant_words() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["I", " do"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("the a it", &mut surface).await;
        let outcome = dialogue.handle_input("/분석", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::AnalysisFailed(AnalysisError::NoSignificantWords)));
        assert_eq!(last_text(&dialogue), "❌ 분석할 유의미한 단어가 없습니다.");
    }

    #[tokio::test]
    async fn test_successful_analysis_appends_analysis_turn() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["사과 바나나 사과"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("포도 사과", &mut surface).await;
        let outcome = dialogue.handle_input("  /분석  ", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::Analyzed));
        assert_eq!(dialogue.conversation().len(), 3);
        match dialogue.conversation().last() {
            Some(Message::Analysis(analysis)) => {
                assert_eq!(analysis.ranking[0].token, "사과");
                assert_eq!(analysis.ranking[0].count, 3);
                assert!(analysis.summary.contains("1. **사과** (3회)"));
                assert!(analysis.chart.as_svg().contains("<svg"));
            }
            other => panic!("Expected analysis turn, got {:?}", other.map(Message::role)),
        }
        assert!(matches!(surface.rendered.last(), Some(Message::Analysis(_))));
    }

    #[tokio::test]
    async fn test_analysis_turn_is_not_sent_or_reanalyzed() {
        let gateway = ScriptedGateway::new(vec![
            Script::Reply(vec!["cargo builds crates"]),
            Script::Reply(vec!["sure"]),
        ]);
        let mut dialogue = dialogue(gateway.clone());
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("rust rust cargo", &mut surface).await;
        dialogue.handle_input("/분석", &mut surface).await;
        let first = match dialogue.conversation().last() {
            Some(Message::Analysis(a)) => a.ranking.clone(),
            _ => panic!("Expected analysis turn"),
        };
        dialogue.handle_input("/분석", &mut surface).await;
        let second = match dialogue.conversation().last() {
            Some(Message::Analysis(a)) => a.ranking.clone(),
            _ => panic!("Expected analysis turn"),
        };
        assert_eq!(first, second);

        dialogue.handle_input("thanks", &mut surface).await;
        let requests = gateway.requests.lock().unwrap();
        let last_request = requests.last().unwrap();
        assert_eq!(last_request.len(), 3);
        assert!(last_request.iter().all(|m| !m.content.contains("TOP 10")));
    }

    #[tokio::test]
    async fn test_command_inside_sentence_is_chat() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["ok"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        let outcome = dialogue.handle_input("please run /분석 now", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::Replied));
    }

    #[tokio::test]
    async fn test_clear_then_analyze_reports_empty_conversation() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["hello world"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("greetings friend", &mut surface).await;
        dialogue.clear();
        assert_eq!(dialogue.conversation().len(), 0);

        let outcome = dialogue.handle_input("/분석", &mut surface).await;
        assert!(matches!(outcome, TurnOutcome::AnalysisFailed(AnalysisError::EmptyConversation)));
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let gateway = ScriptedGateway::new(vec![]);
        let mut dialogue = dialogue(gateway.clone());
        let mut surface = RecordingSurface::default();

        let outcome = dialogue.handle_input("   ", &mut surface).await;

        assert!(matches!(outcome, TurnOutcome::Ignored));
        assert!(dialogue.conversation().is_empty());
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_english_command_literal() {
        let gateway = ScriptedGateway::new(vec![]);
        let mut dialogue = Dialogue::new(LlmBroker::new("test-model", gateway), Language::English);
        let mut surface = RecordingSurface::default();

        assert!(dialogue.is_analysis_command("/analyze"));
        assert!(!dialogue.is_analysis_command("/분석"));

        dialogue.handle_input("/analyze", &mut surface).await;
        assert_eq!(last_text(&dialogue), "❌ There is no conversation to analyze.");
    }

    #[tokio::test]
    async fn test_stats_follow_conversation() {
        let gateway = ScriptedGateway::new(vec![Script::Reply(vec!["answer text"])]);
        let mut dialogue = dialogue(gateway);
        let mut surface = RecordingSurface::default();

        dialogue.handle_input("question text", &mut surface).await;
        dialogue.handle_input("/분석", &mut surface).await;

        let stats = dialogue.stats();
        assert_eq!(stats.user_messages, 1);
        assert_eq!(stats.assistant_messages, 1);
        assert_eq!(stats.total(), 2);
    }
}
