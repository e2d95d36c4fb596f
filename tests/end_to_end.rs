//! End-to-end offer flows over real TCP connections.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use pawnshop::protocol::{Answer, Offer, RequestKind, REJECT_FRAME};
use pawnshop::PawnShopServer;

mod common;

#[tokio::test]
async fn sequential_offers() {
    let (running, inventory) = common::start_with_inventory(common::test_config(5)).await;
    let client = running.client();

    // The shop takes 7 for one of its 1s.
    let answer = client.send_offer(&Offer::pawn(7, 1)).await.unwrap();
    assert_eq!(answer, Answer::accept(1));
    assert_eq!(inventory.snapshot().items, vec![7, 1, 1, 1, 1]);

    // Nothing worth at least 3 is priced below 5.
    let answer = client.send_offer(&Offer::pawn(5, 3)).await.unwrap();
    assert_eq!(answer, Answer::reject());
    assert_eq!(inventory.snapshot().items, vec![7, 1, 1, 1, 1]);

    let answer = client.send_offer(&Offer::pawn(4, 1)).await.unwrap();
    assert_eq!(answer, Answer::accept(1));
    assert_eq!(inventory.snapshot().items, vec![7, 4, 1, 1, 1]);

    let answer = client.send_offer(&Offer::pawn(25, 8)).await.unwrap();
    assert_eq!(answer, Answer::reject());
    assert_eq!(inventory.snapshot().items, vec![7, 4, 1, 1, 1]);

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn server_built_from_config() {
    let running = common::run(PawnShopServer::new(common::test_config(2)).unwrap()).await;
    let client = running.client();

    assert_eq!(client.send_offer(&Offer::pawn(3, 1)).await.unwrap(), Answer::accept(1));
    assert_eq!(client.send_offer(&Offer::pawn(3, 1)).await.unwrap(), Answer::accept(1));
    // Both slots now hold 3, so a second 3 can never be profitable.
    assert_eq!(client.send_offer(&Offer::pawn(3, 1)).await.unwrap(), Answer::reject());

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn policy_rejects_before_inventory() {
    let (running, inventory) = common::start_with_inventory(common::test_config(3)).await;
    let before = inventory.snapshot();

    let answer = running.client().send_offer(&Offer::pawn(2, 3)).await.unwrap();
    assert_eq!(answer, Answer::reject());
    assert_eq!(inventory.snapshot(), before);

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn unsupported_kind_is_rejected() {
    let (running, inventory) = common::start_with_inventory(common::test_config(3)).await;

    let offer = Offer {
        kind: RequestKind::Unsupported("SELL".into()),
        offer: 10,
        demand: 1,
    };
    let answer = running.client().send_offer(&offer).await.unwrap();
    assert_eq!(answer, Answer::reject());
    assert_eq!(inventory.snapshot().items, vec![1, 1, 1]);

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn malformed_request_gets_rejection_and_close() {
    let running = common::run(PawnShopServer::new(common::test_config(2)).unwrap()).await;

    let mut stream = TcpStream::connect(running.addr).await.unwrap();
    stream.write_all(b"{\"code\": PAWN}").await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    assert_eq!(reply, REJECT_FRAME);

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejection_has_no_value_on_the_wire() {
    let running = common::run(PawnShopServer::new(common::test_config(2)).unwrap()).await;

    let mut stream = TcpStream::connect(running.addr).await.unwrap();
    stream.write_all(br#"{"code":"PAWN","offer":1,"demand":0}"#).await.unwrap();

    let mut reply = String::new();
    stream.read_to_string(&mut reply).await.unwrap();
    assert_eq!(reply, r#"{"code":"REJECT"}"#);

    running.shutdown().await.unwrap();
}
