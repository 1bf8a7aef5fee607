//! Example searching a subscriber by phone number against a running backend
//!
//! Run with: VIDEOCALL__BASE_URL=http://localhost:8080 cargo run --example search_subscriber -- 13812345678

use std::sync::Arc;

use tokio::sync::mpsc;
use vc_core::{SearchCallback, UserRecord};
use vc_infra::{init_tracing, initialize};
use vc_shared::LoggingConfig;

struct PrintCallback {
    done: mpsc::UnboundedSender<()>,
}

impl SearchCallback for PrintCallback {
    fn on_success(&self, record: UserRecord) {
        println!("Callback: found subscriber {}", record.as_value());
        let _ = self.done.send(());
    }

    fn on_fail(&self, code: i32) {
        println!("Callback: search failed with code {}", code);
        let _ = self.done.send(());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&LoggingConfig::from_env())?;

    let phone = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "13812345678".to_string());
    let service = initialize()?;

    println!("\n=== Future-based search ===");
    match service.search(&phone).await {
        Ok(record) => println!("Found subscriber: {}", record.as_value()),
        Err(e) => println!("Search failed (code {}): {}", e.code(), e),
    }

    println!("\n=== Callback-based search ===");
    let (done, mut finished) = mpsc::unbounded_channel();
    service.search_by_phone_number(&phone, Some(Arc::new(PrintCallback { done })));
    finished.recv().await;

    println!("\n=== Superseded search ===");
    let stale = service.search(&phone);
    let fresh = service.search(&phone);
    println!("First search: {:?}", stale.await.err());
    println!("Second search ok: {}", fresh.await.is_ok());

    Ok(())
}
