//! End-to-end capture test against a local HTTP server
#![cfg(feature = "cdp")]

use std::sync::Once;

use tiny_http::{Response, Server};

use pagesnap::{artifact_filename, CaptureConfig, CdpRenderer, NameOrder, Renderer, Viewport};

static INIT: Once = Once::new();

/// Start a simple test HTTP server
fn start_test_server() -> String {
    INIT.call_once(|| {
        std::thread::spawn(|| {
            let server = Server::http("127.0.0.1:18091").unwrap();
            for request in server.incoming_requests() {
                let response = Response::from_string(
                    r#"<!DOCTYPE html>
<html>
<head><title>Capture Test</title></head>
<body>
<h1>Hello from Test Server</h1>
</body>
</html>"#,
                )
                .with_header(
                    "Content-Type: text/html; charset=utf-8"
                        .parse::<tiny_http::Header>()
                        .unwrap(),
                );
                let _ = request.respond(response);
            }
        });
        // Give the server time to start
        std::thread::sleep(std::time::Duration::from_millis(100));
    });

    "http://127.0.0.1:18091".to_string()
}

#[test]
#[ignore] // Requires Chrome to be installed
fn capture_writes_one_artifact_per_size() {
    let base_url = start_test_server();
    let dir = tempfile::tempdir().unwrap();

    let renderer = CdpRenderer::new(CaptureConfig::new(dir.path().to_path_buf()))
        .expect("Failed to launch browser");

    let sizes = vec![
        Viewport {
            width: 800,
            height: 600,
        },
        Viewport {
            width: 400,
            height: 300,
        },
    ];
    renderer.render(&base_url, &sizes).expect("capture failed");

    for size in sizes {
        let name = artifact_filename(&base_url, size, NameOrder::TargetFirst);
        let data = std::fs::read(dir.path().join(name)).expect("artifact missing");
        assert!(data.len() > 100, "PNG data seems too small");
        // PNG files start with these magic bytes
        assert_eq!(&data[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
