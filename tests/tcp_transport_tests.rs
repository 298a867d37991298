use battleship_ai::transport::tcp::TcpTransport;
use battleship_ai::{
    serve_listener, Codec, Failure, FailureKind, GameState, Message, PlannerApi, ServerConfig,
    ShotType, Stub, Transport, PROTOCOL_VERSION,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;

async fn spawn_server(codec: Codec) -> anyhow::Result<std::net::SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let config = ServerConfig {
        codec,
        ..ServerConfig::default()
    };
    tokio::spawn(async move {
        let _ = serve_listener(listener, config).await;
    });
    Ok(addr)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stub_skeleton_tcp() -> anyhow::Result<()> {
    for codec in [Codec::Json, Codec::Bincode] {
        let addr = spawn_server(codec).await?;
        let transport = TcpTransport::connect_with(addr, codec).await?;
        assert_eq!(transport.codec(), codec);
        let mut stub = Stub::new(transport);

        let mut state = GameState::new(vec![0; 100]);
        state.airstrike_available = true;
        let res = stub.next_move(state).await?;
        assert_eq!(res.shot_type, 1);
        assert!(res.pattern == ShotType::AirstrikeUpRight
            || res.pattern == ShotType::AirstrikeDownRight);
        assert_eq!(res.cells.len(), 3);

        let err = stub
            .next_move(GameState::new(vec![3; 100]))
            .await
            .unwrap_err();
        let failure = err.downcast_ref::<Failure>().expect("failure payload");
        assert_eq!(failure.kind, FailureKind::NoLegalMove);

        stub.close().await?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connections_are_independent() -> anyhow::Result<()> {
    let addr = spawn_server(Codec::Json).await?;

    let mut clients = Vec::new();
    for _ in 0..4 {
        clients.push(tokio::spawn(async move {
            let mut stub = Stub::new(TcpTransport::connect(addr).await?);
            let mut last = None;
            for _ in 0..3 {
                let res = stub.next_move(GameState::new(vec![0; 100])).await?;
                if let Some(prev) = last {
                    assert_eq!(prev, res.cell_index);
                }
                last = Some(res.cell_index);
            }
            stub.close().await?;
            anyhow::Ok(())
        }));
    }
    for client in clients {
        client.await??;
    }
    Ok(())
}

async fn write_frame(stream: &mut TcpStream, payload: &[u8]) -> anyhow::Result<()> {
    stream.write_all(&(payload.len() as u32).to_be_bytes()).await?;
    stream.write_all(payload).await?;
    Ok(())
}

async fn read_frame(stream: &mut TcpStream) -> anyhow::Result<Message> {
    let mut len = [0u8; 4];
    stream.read_exact(&mut len).await?;
    let mut buf = vec![0u8; u32::from_be_bytes(len) as usize];
    stream.read_exact(&mut buf).await?;
    Codec::Json.decode(&buf)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_request_gets_bad_request() -> anyhow::Result<()> {
    let addr = spawn_server(Codec::Json).await?;
    let mut raw = TcpStream::connect(addr).await?;

    let hello = Codec::Json.encode(&Message::Hello {
        version: PROTOCOL_VERSION,
    })?;
    write_frame(&mut raw, &hello).await?;
    assert!(matches!(read_frame(&mut raw).await?, Message::Hello { .. }));

    let mut malformed = String::from(r#"{"NextMove":{"grid":["#);
    malformed.push_str(&vec!["0"; 100].join(","));
    malformed.push_str(r#"],"remaining_ships":[-1]}}"#);
    write_frame(&mut raw, malformed.as_bytes()).await?;
    match read_frame(&mut raw).await? {
        Message::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::BadRequest);
            assert!(failure.detail.contains("Deserialization"));
        }
        other => panic!("unexpected reply: {:?}", other),
    }

    // the session survives the bad frame
    let request = Codec::Json.encode(&Message::NextMove(GameState::new(vec![0; 100])))?;
    write_frame(&mut raw, &request).await?;
    match read_frame(&mut raw).await? {
        Message::Move(res) => assert_eq!(res.pattern, ShotType::Single),
        other => panic!("unexpected reply: {:?}", other),
    }

    write_frame(&mut raw, &Codec::Json.encode(&Message::Bye)?).await?;
    Ok(())
}

#[tokio::test]
async fn test_oversized_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut transport =
            TcpTransport::with_config(socket, Codec::Json, Duration::from_secs(5), 64);
        transport.recv().await
    });

    let mut raw = TcpStream::connect(addr).await?;
    raw.write_all(&(1_000u32).to_be_bytes()).await?;
    raw.write_all(&[0u8; 16]).await?;

    let result = server.await.unwrap();
    assert!(result.unwrap_err().to_string().contains("too large"));
    Ok(())
}

#[tokio::test]
async fn test_zero_length_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(socket);
        transport.recv().await
    });

    let mut raw = TcpStream::connect(addr).await?;
    raw.write_all(&0u32.to_be_bytes()).await?;

    assert!(server.await.unwrap().is_err());
    Ok(())
}

#[tokio::test]
async fn test_peer_disconnect_is_reported() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(socket);
        transport.recv().await
    });

    let client = TcpTransport::connect(addr).await?;
    drop(client);

    let err = server.await.unwrap().unwrap_err();
    assert!(err.to_string().contains("closed"));
    Ok(())
}

#[tokio::test]
async fn test_send_rejects_oversized_message() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let _accept = tokio::spawn(async move { listener.accept().await });

    let stream = TcpStream::connect(addr).await?;
    let mut transport = TcpTransport::with_config(stream, Codec::Json, Duration::from_secs(5), 8);
    let err = transport
        .send(Message::NextMove(GameState::new(vec![0; 100])))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("too large"));
    Ok(())
}
