//! Integration tests for the client WebSocket transport.
//!
//! These tests connect the real transport to a real WebSocket server bound on
//! loopback and check the event sequence the state machine relies on.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use relaychat_client::{
    TransportEvent,
    transport::{self, ConnectedClient, TransportConfig},
};
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Start a server that echoes text frames back, return its URL.
async fn start_echo_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((tcp, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(tcp).await else { return };
                while let Some(Ok(msg)) = ws.next().await {
                    if msg.is_text() && ws.send(msg).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    url
}

/// Start a server that sends `frames` to the first client, then closes.
async fn start_scripted_server(frames: Vec<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let Ok((tcp, _)) = listener.accept().await else { return };
        let Ok(mut ws) = accept_async(tcp).await else { return };
        for frame in frames {
            if ws.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
        let _ = ws.close(None).await;
    });

    url
}

/// URL of a loopback port nothing listens on.
async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{addr}")
}

async fn next(client: &mut ConnectedClient) -> Option<TransportEvent> {
    timeout(Duration::from_secs(5), client.next_event()).await.expect("timed out waiting for event")
}

#[tokio::test]
async fn client_opens_connection() {
    let url = start_echo_server().await;
    let mut client = transport::open_with_config(url, TransportConfig::development());

    assert_eq!(next(&mut client).await, Some(TransportEvent::Opened));
}

#[tokio::test]
async fn sent_frames_reach_the_server() {
    let url = start_echo_server().await;
    let mut client = transport::open_with_config(url, TransportConfig::development());
    assert_eq!(next(&mut client).await, Some(TransportEvent::Opened));

    client.send("/name alice".to_string()).await.unwrap();
    client.send("hello".to_string()).await.unwrap();

    assert_eq!(next(&mut client).await, Some(TransportEvent::Message("/name alice".into())));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Message("hello".into())));
}

#[tokio::test]
async fn burst_of_sends_without_reading_does_not_stall() {
    let url = start_echo_server().await;
    let mut client = transport::open_with_config(url, TransportConfig::development());
    assert_eq!(next(&mut client).await, Some(TransportEvent::Opened));

    // Several times the outbound buffer, all echoed back while nobody reads.
    for i in 0..300 {
        timeout(Duration::from_secs(3), client.send(format!("line {i}")))
            .await
            .unwrap_or_else(|_| panic!("send {i} blocked"))
            .unwrap();
    }

    for i in 0..300 {
        assert_eq!(next(&mut client).await, Some(TransportEvent::Message(format!("line {i}"))));
    }
}

#[tokio::test]
async fn inbound_frames_arrive_in_order_then_closed() {
    let url = start_scripted_server(vec!["USERS:alice,bob", "SYSTEM:bob joined", "hi"]).await;
    let mut client = transport::open_with_config(url, TransportConfig::development());

    assert_eq!(next(&mut client).await, Some(TransportEvent::Opened));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Message("USERS:alice,bob".into())));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Message("SYSTEM:bob joined".into())));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Message("hi".into())));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Closed));
}

#[tokio::test]
async fn refused_connection_reports_error_then_closed() {
    let url = refused_url().await;
    let mut client = transport::open_with_config(url, TransportConfig::development());

    assert!(matches!(next(&mut client).await, Some(TransportEvent::Error(_))));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Closed));
    assert_eq!(next(&mut client).await, None);
}

#[tokio::test]
async fn invalid_url_reports_error_then_closed() {
    let mut client = transport::open_with_config("not a url", TransportConfig::development());

    assert!(matches!(next(&mut client).await, Some(TransportEvent::Error(_))));
    assert_eq!(next(&mut client).await, Some(TransportEvent::Closed));
}

#[tokio::test]
async fn stopped_client_produces_no_more_events() {
    let url = start_echo_server().await;
    let mut client = transport::open_with_config(url, TransportConfig::development());
    assert_eq!(next(&mut client).await, Some(TransportEvent::Opened));

    client.stop();

    assert_eq!(next(&mut client).await, None);
}
