#![cfg(feature = "std")]

use morris::{NetError, TcpTransport, Transport};
use tokio::time::{sleep, timeout, Duration};

async fn connected_pair() -> anyhow::Result<(TcpTransport, TcpTransport)> {
    let listener = TcpTransport::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (server, client) = tokio::join!(TcpTransport::accept(&listener), TcpTransport::connect(addr));
    Ok((server?, client?))
}

/// Poll until `n` lines have arrived.
async fn collect_lines(t: &mut TcpTransport, n: usize) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    timeout(Duration::from_secs(5), async {
        while lines.len() < n {
            lines.extend(t.poll_lines()?);
            sleep(Duration::from_millis(5)).await;
        }
        Ok::<(), NetError>(())
    })
    .await??;
    Ok(lines)
}

#[tokio::test(flavor = "multi_thread")]
async fn lines_cross_a_real_socket() -> anyhow::Result<()> {
    let (mut server, mut client) = connected_pair().await?;
    assert!(client.poll_lines()?.is_empty());

    server.send_line("ROLL 3 5").await?;
    server.send_line("RULES TOURNAMENT").await?;
    server.send_line("START BLACK").await?;
    let lines = collect_lines(&mut client, 3).await?;
    assert_eq!(lines, vec!["ROLL 3 5", "RULES TOURNAMENT", "START BLACK"]);

    client.send_line("SET 2 0").await?;
    assert_eq!(collect_lines(&mut server, 1).await?, vec!["SET 2 0"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_socket_reports_disconnect() -> anyhow::Result<()> {
    let (mut server, mut client) = connected_pair().await?;
    server.send_line("DRAW").await?;
    server.close().await;
    drop(server);

    let mut seen = Vec::new();
    let err = timeout(Duration::from_secs(5), async {
        loop {
            match client.poll_lines() {
                Ok(lines) => seen.extend(lines),
                Err(e) => return e,
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await?;
    assert_eq!(err, NetError::PeerDisconnected);
    assert_eq!(seen, vec!["DRAW"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_failure_is_a_resource_error() -> anyhow::Result<()> {
    let listener = TcpTransport::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    match TcpTransport::connect(addr).await {
        Err(NetError::Resource(_)) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("unexpected error: {}", e)),
        Ok(_) => Err(anyhow::anyhow!("connected to a closed port")),
    }
}
