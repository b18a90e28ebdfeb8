use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use wiredit_client::{
    AssistantChannel, AssistantRequest, AssistantResponse, ChatRole, ChatTranscript,
    ClientError, ClientResult, GREETING,
};
use wiredit_common::ErrorKind;

/// Replays canned answers in order and records what it was asked
struct ScriptedAssistant {
    answers: Mutex<Vec<ClientResult<AssistantResponse>>>,
    asked: Mutex<Vec<AssistantRequest>>,
}

impl ScriptedAssistant {
    fn new(mut answers: Vec<ClientResult<AssistantResponse>>) -> Self {
        answers.reverse();
        Self {
            answers: Mutex::new(answers),
            asked: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantChannel for ScriptedAssistant {
    async fn ask(&self, request: &AssistantRequest) -> ClientResult<AssistantResponse> {
        self.asked.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ClientError::Transport("script exhausted".into())))
    }
}

fn reply(narrative: &str, document: Option<&str>) -> ClientResult<AssistantResponse> {
    Ok(AssistantResponse {
        narrative: narrative.to_string(),
        proposed_document: document.map(ToString::to_string),
        suggestions: vec!["Add a shield".to_string()],
    })
}

#[test]
fn test_transcript_starts_with_greeting() {
    let transcript = ChatTranscript::new();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages()[0].content, GREETING);
    assert_eq!(transcript.messages()[0].role, ChatRole::Assistant);
}

#[tokio::test]
async fn test_successful_exchange_proposes_document() {
    let assistant = ScriptedAssistant::new(vec![reply("Added X3.", Some("connectors:\n  X3: {}"))]);
    let mut transcript = ChatTranscript::new();

    let turn = transcript
        .send(&assistant, "add connector X3", Some("connectors: {}"))
        .await
        .unwrap();

    assert_eq!(turn.proposed_document.as_deref(), Some("connectors:\n  X3: {}"));
    assert_eq!(turn.suggestions, vec!["Add a shield"]);
    assert!(turn.error.is_none());

    let messages = transcript.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[1].is_user());
    assert_eq!(messages[2].content, "Added X3.");
    assert!(messages[1].id < messages[2].id);

    let asked = assistant.asked.lock().unwrap();
    assert_eq!(asked[0].current_document.as_deref(), Some("connectors: {}"));
}

#[tokio::test]
async fn test_transport_failure_becomes_message_without_document() {
    let assistant = ScriptedAssistant::new(vec![Err(ClientError::Timeout(Duration::from_secs(60)))]);
    let mut transcript = ChatTranscript::new();

    let turn = transcript.send(&assistant, "add a ground wire", None).await.unwrap();

    assert!(turn.proposed_document.is_none());
    assert_eq!(turn.error.as_ref().map(ClientError::kind), Some(ErrorKind::Transport));
    let last = transcript.last().unwrap();
    assert_eq!(last.role, ChatRole::Assistant);
    assert!(last.content.starts_with("Error connecting to server"));
}

#[tokio::test]
async fn test_service_failure_shows_detail() {
    let assistant = ScriptedAssistant::new(vec![Err(ClientError::Service {
        status: Some(500),
        detail: "LLM quota exceeded".into(),
    })]);
    let mut transcript = ChatTranscript::new();

    let turn = transcript.send(&assistant, "add a ground wire", None).await.unwrap();

    assert!(turn.proposed_document.is_none());
    assert_eq!(
        transcript.last().unwrap().content,
        "Sorry, I encountered an error. LLM quota exceeded"
    );
}

#[tokio::test]
async fn test_blank_instruction_sends_nothing() {
    let assistant = ScriptedAssistant::new(vec![]);
    let mut transcript = ChatTranscript::new();

    let err = transcript.send(&assistant, "  ", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transcript.len(), 1);
    assert!(assistant.asked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_proposal_and_empty_narrative() {
    let assistant = ScriptedAssistant::new(vec![reply("", Some("   "))]);
    let mut transcript = ChatTranscript::new();

    let turn = transcript.send(&assistant, "explain", None).await.unwrap();

    assert!(turn.proposed_document.is_none());
    assert_eq!(transcript.last().unwrap().content, "Sorry, I encountered an error.");
}

#[test]
fn test_begin_records_instruction_before_reply() {
    let mut transcript = ChatTranscript::new();

    let request = transcript.begin("add X2", Some("connectors: {}")).unwrap();
    assert_eq!(request.instruction, "add X2");
    assert_eq!(transcript.len(), 2);
    assert!(transcript.last().unwrap().is_user());

    let turn = transcript.complete(reply("Added X2.", Some("connectors:\n  X2: {}")));
    assert_eq!(turn.proposed_document.as_deref(), Some("connectors:\n  X2: {}"));
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.last().unwrap().content, "Added X2.");
}
