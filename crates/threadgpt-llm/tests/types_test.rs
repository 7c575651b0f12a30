use threadgpt_llm::Message;

#[test]
fn test_message_system() {
    let msg = Message::system("You are helpful");
    assert_eq!(msg.role(), "system");
}

#[test]
fn test_message_human() {
    let msg = Message::human("Hello");
    assert_eq!(msg.role(), "user");
}

#[test]
fn test_message_ai() {
    let msg = Message::ai("Hi there!");
    assert_eq!(msg.role(), "assistant");
}

#[test]
fn test_message_serialization_human() {
    let msg = Message::human("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_serialization_ai() {
    let msg = Message::ai("Response");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"assistant\""));
}

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"user","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role(), "user");
    assert_eq!(msg.content(), "Test");
}
