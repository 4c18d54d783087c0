//! Terminal rendering of the loading indicator.

use std::future::Future;
use std::io::{IsTerminal, Write};

use yatra_core::LoadingIndicator;

/// Bar width in cells.
const WIDTH: usize = 24;

/// Drive `fut` with a loading indicator running alongside it.
///
/// The bar is drawn on stderr, and only when stderr is a terminal.
pub async fn run<F: Future>(fut: F) -> F::Output {
    let indicator = LoadingIndicator::new();

    let render = std::io::stderr().is_terminal().then(|| {
        let mut rx = indicator.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let value = *rx.borrow_and_update();
                let mut stderr = std::io::stderr().lock();
                let _ = write!(stderr, "\r{}", bar(value));
                let _ = stderr.flush();
            }
        })
    });

    indicator.start_loading();
    let output = fut.await;
    indicator.complete_loading();

    if let Some(task) = render {
        task.abort();
        eprint!("\r\x1b[2K");
    }

    output
}

fn bar(value: u8) -> String {
    let value = value.min(100);
    let filled = WIDTH * value as usize / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        value
    )
}
