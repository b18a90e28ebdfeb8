//! HTTP round trips against a one-shot local server

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use wiredit_client::{AssistantChannel, AssistantRequest, HttpAssistant, HttpRenderService};
use wiredit_common::ErrorKind;
use wiredit_preview::{PreviewError, RenderFormat, RenderRequest, RenderService};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Answers a single request with `status` and `body`, yielding the request body
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request_body = read_request_body(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request_body
    });

    (url, handle)
}

async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return String::new();
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + length {
                return String::from_utf8_lossy(&buf[start..start + length]).into_owned();
            }
        }
    }
}

fn request(document: &str, format: RenderFormat) -> RenderRequest {
    RenderRequest {
        token: 1,
        document: document.to_string(),
        format,
    }
}

#[tokio::test]
async fn test_render_success() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"success": true, "diagram_data": "<svg>X1</svg>", "bom_data": "Id\tQty\n1\t1", "format": "svg"}"#,
    )
    .await;
    let service = HttpRenderService::new(url, TIMEOUT).unwrap();

    let response = service
        .render(&request("connectors: {X1: {}}", RenderFormat::Svg))
        .await
        .unwrap();
    assert_eq!(response.diagram_artifact.as_deref(), Some("<svg>X1</svg>"));
    assert_eq!(response.parts_list.as_deref(), Some("Id\tQty\n1\t1"));

    let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(sent["yaml_content"], "connectors: {X1: {}}");
    assert_eq!(sent["format"], "svg");
}

#[tokio::test]
async fn test_render_reported_failure_is_service_error() {
    let (url, _server) = serve_once(
        "200 OK",
        r#"{"success": false, "error": "Connector X9 is not defined", "format": "png"}"#,
    )
    .await;
    let service = HttpRenderService::new(url, TIMEOUT).unwrap();

    let err = service
        .render(&request("cables: {}", RenderFormat::Png))
        .await
        .unwrap_err();
    assert_eq!(err, PreviewError::Service("Connector X9 is not defined".into()));
}

#[tokio::test]
async fn test_error_envelope_detail_is_surfaced() {
    let (url, _server) = serve_once(
        "500 Internal Server Error",
        r#"{"detail": "WireViz crashed"}"#,
    )
    .await;
    let service = HttpRenderService::new(url, TIMEOUT).unwrap();

    let err = service
        .render(&request("cables: {}", RenderFormat::Svg))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "WireViz crashed");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let service = HttpRenderService::new(url, TIMEOUT).unwrap();
    let err = service
        .render(&request("cables: {}", RenderFormat::Svg))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let timeout = Duration::from_millis(200);
    let service = HttpRenderService::new(url, timeout).unwrap();
    let err = service
        .render(&request("cables: {}", RenderFormat::Svg))
        .await
        .unwrap_err();
    assert_eq!(err, PreviewError::Timeout(timeout));
}

#[tokio::test]
async fn test_assistant_round_trip() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"response": {"content": "Added a ground wire.", "yaml_generated": "cables:\n  W1: {}", "suggestions": ["Label the wire"]}}"#,
    )
    .await;
    let assistant = HttpAssistant::new(url, TIMEOUT).unwrap();

    let request =
        AssistantRequest::new("add a ground wire", Some("connectors: {}".to_string())).unwrap();
    let response = assistant.ask(&request).await.unwrap();

    assert_eq!(response.narrative, "Added a ground wire.");
    assert_eq!(response.document(), Some("cables:\n  W1: {}"));
    assert_eq!(response.suggestions, vec!["Label the wire"]);

    let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(sent["content"], "add a ground wire");
    assert_eq!(sent["current_yaml"], "connectors: {}");
}
