//! Walks a banner through a first visit, a return visit and a reset.
//!
//! Run with: `cargo run -q --example banner_flow -p pylink_consent_core`

use pylink_consent_core::{BannerAction, BannerController, ConsentStore, MemoryStore, PageHost};
use std::time::{Duration, SystemTime};

struct PrintingPage;

impl PageHost for PrintingPage {
    fn set_banner_visible(&mut self, visible: bool) {
        println!("  banner {}", if visible { "shown" } else { "hidden" });
    }

    fn reload(&mut self) {
        println!("  page reloaded");
    }
}

fn main() {
    let mut controller =
        BannerController::new(ConsentStore::new(MemoryStore::new()), PrintingPage);
    let now = SystemTime::now();

    println!("[First visit]");
    controller.on_page_load(now).expect("storage available");
    for action in [
        BannerAction::TogglePreferences,
        BannerAction::SetAnalytics(true),
        BannerAction::SavePreferences,
    ] {
        println!("  -> {action}");
        controller.dispatch(action, now).expect("storage available");
    }

    let record = controller
        .consent()
        .get_consent()
        .expect("storage available")
        .expect("consent was just saved");
    println!(
        "  stored: {}",
        serde_json::to_string_pretty(&record).expect("record serializes")
    );

    println!("\n[Return visit, 30 days later]");
    let later = now + Duration::from_secs(30 * 24 * 60 * 60);
    controller.on_page_load(later).expect("storage available");

    println!("\n[Reset]");
    controller.clear_consent().expect("storage available");
    controller.on_page_load(later).expect("storage available");
}
