use crate::sdk_provider_deepseek::normalize::{
    extract_text, extract_text_without_thinking, normalize_messages, to_wire_messages,
};
use crate::sdk_types::{ChatMessage, ContentPart, ImageUrl, Message, MessageContent, Role};

fn roles(messages: &[Message]) -> Vec<Role> {
    messages.iter().map(|m| m.role).collect()
}

#[test]
fn leading_assistant_turns_are_dropped() {
    let out = normalize_messages(vec![
        Message::system("be brief"),
        Message::assistant("hello! how can I help?"),
        Message::user("hi"),
        Message::assistant("hey"),
        Message::user("bye"),
    ]);
    assert_eq!(
        roles(&out),
        vec![Role::System, Role::User, Role::Assistant, Role::User]
    );
    assert_eq!(out[2].content, "hey");
}

#[test]
fn system_messages_survive_anywhere() {
    let out = normalize_messages(vec![
        Message::assistant("a"),
        Message::system("s1"),
        Message::user("u"),
        Message::system("s2"),
    ]);
    assert_eq!(roles(&out), vec![Role::System, Role::User, Role::System]);
}

#[test]
fn without_user_only_system_remains() {
    let out = normalize_messages(vec![Message::assistant("a"), Message::assistant("b")]);
    assert!(out.is_empty());

    let out = normalize_messages(vec![Message::system("s"), Message::assistant("a")]);
    assert_eq!(roles(&out), vec![Role::System]);
}

#[test]
fn normalization_is_idempotent() {
    let input = vec![
        Message::assistant("x"),
        Message::user("u1"),
        Message::assistant("a1"),
        Message::user("u2"),
    ];
    let once = normalize_messages(input);
    let twice = normalize_messages(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn rendered_thinking_is_stripped_from_assistant_text() {
    let rendered = "> thinking about it\n\n> more thoughts\n\nThe answer is 4.";
    let msg = ChatMessage::assistant(rendered);
    assert_eq!(extract_text_without_thinking(&msg), "The answer is 4.");
}

#[test]
fn user_text_keeps_quote_lines() {
    let msgs = to_wire_messages(&[
        ChatMessage::user("> quoted\nreply"),
        ChatMessage::assistant("> thought\n\nanswer"),
    ]);
    assert_eq!(msgs[0].content, "> quoted\nreply");
    assert_eq!(msgs[1].content, "answer");
}

#[test]
fn multimodal_messages_use_first_text_part() {
    let msg = ChatMessage::user(MessageContent::Parts(vec![
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "https://img.local/cat.png".into(),
            },
        },
        ContentPart::Text {
            text: "what is this?".into(),
        },
        ContentPart::Text {
            text: "second".into(),
        },
    ]));
    assert_eq!(extract_text(&msg), "what is this?");
    let wire = to_wire_messages(&[msg]);
    assert_eq!(wire[0].content, "what is this?");
}
