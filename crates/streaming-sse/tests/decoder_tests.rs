use crate::sdk_streaming_sse::{SseDecoder, SseFrame};

#[test]
fn decodes_single_data_frame() {
    let mut decoder = SseDecoder::new();
    let frames: Vec<_> = decoder.push(b"data: {\"choices\":[]}\n\n").collect();

    assert_eq!(frames, vec![SseFrame::data("{\"choices\":[]}")]);
}

#[test]
fn keeps_event_and_id_fields() {
    let mut decoder = SseDecoder::new();
    let frames: Vec<_> = decoder
        .push(b"id: 7\nevent: message\ndata: payload\n\n")
        .collect();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].id.as_deref(), Some("7"));
    assert_eq!(frames[0].event.as_deref(), Some("message"));
    assert_eq!(frames[0].data, "payload");
}

#[test]
fn joins_multiline_data() {
    let mut decoder = SseDecoder::new();
    let frames: Vec<_> = decoder.push(b"data: line 1\ndata: line 2\n\n").collect();

    assert_eq!(frames[0].data, "line 1\nline 2");
}

#[test]
fn buffers_until_blank_line() {
    let mut decoder = SseDecoder::new();

    assert_eq!(decoder.push(b"data: {\"a\":").count(), 0);
    assert!(decoder.has_buffered_data());

    let frames: Vec<_> = decoder.push(b"1}\n\n").collect();
    assert_eq!(frames, vec![SseFrame::data("{\"a\":1}")]);
    assert!(!decoder.has_buffered_data());
}

#[test]
fn handles_crlf_split_across_chunks() {
    let mut decoder = SseDecoder::new();

    assert_eq!(decoder.push(b"data: chunked\r\n").count(), 0);
    let frames: Vec<_> = decoder.push(b"\r\n").collect();
    assert_eq!(frames, vec![SseFrame::data("chunked")]);
}

#[test]
fn skips_comments_and_keepalives() {
    let mut decoder = SseDecoder::new();
    let frames: Vec<_> = decoder
        .push(b": keep-alive\n\ndata: real\n\n")
        .collect();

    assert_eq!(frames, vec![SseFrame::data("real")]);
}

#[test]
fn multibyte_text_split_mid_character() {
    let bytes = "data: 你好\n\n".as_bytes();
    let mut decoder = SseDecoder::new();

    assert_eq!(decoder.push(&bytes[..8]).count(), 0);
    let frames: Vec<_> = decoder.push(&bytes[8..]).collect();
    assert_eq!(frames, vec![SseFrame::data("你好")]);
}

#[test]
fn finish_flushes_unterminated_frame() {
    let mut decoder = SseDecoder::new();
    assert_eq!(decoder.push(b"data: [DONE]").count(), 0);

    let frames: Vec<_> = decoder.finish().collect();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_done());
}

#[test]
fn done_marker_detection() {
    assert!(SseFrame::data("[DONE]").is_done());
    assert!(!SseFrame::data("{\"choices\":[]}").is_done());
}
