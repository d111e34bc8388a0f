//! Avatars domain: catalog, wardrobe and request handling tests.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::*;
use crate::core::{CorePlugin, LifeSet, SessionConfig};
use crate::progression::{LevelingCurve, ProgressionLedger, ProgressionPlugin};
use crate::rewards::RewardsPlugin;

fn ledger_with(coins: u64) -> ProgressionLedger {
    ProgressionLedger::restore(0, 1, coins, LevelingCurve::default())
}

// -----------------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------------

#[test]
fn test_catalog_has_origin_and_hundred_shells() {
    let catalog = AvatarCatalog::default();
    assert_eq!(catalog.avatars().len(), 101);

    let origin = &catalog.avatars()[0];
    assert_eq!(origin.id, "default");
    assert_eq!(origin.name, "Origin Shell");
    assert_eq!(origin.price, 0);

    let first = catalog.get("shell-0").unwrap();
    assert_eq!(first.name, "Shell v1.0");
    assert_eq!(first.price, 500);
    assert_eq!(first.image_seed, "quantum-shell-0");

    let last = catalog.get("shell-99").unwrap();
    assert_eq!(last.name, "Shell v100.0");
    assert_eq!(last.price, 50_000);
    assert!(catalog.get("shell-100").is_none());
}

// -----------------------------------------------------------------------------
// Wardrobe
// -----------------------------------------------------------------------------

#[test]
fn test_buy_needs_full_price() {
    let mut wardrobe = Wardrobe::default();
    let mut ledger = ledger_with(499);

    assert!(!wardrobe.buy("shell-0", 500, &mut ledger));
    assert!(!wardrobe.owns("shell-0"));
    assert_eq!(ledger.coins(), 499);

    ledger.apply_currency(1);
    assert!(wardrobe.buy("shell-0", 500, &mut ledger));
    assert!(wardrobe.owns("shell-0"));
    assert_eq!(ledger.coins(), 0);
}

#[test]
fn test_buy_owned_avatar_is_refused() {
    let mut wardrobe = Wardrobe::default();
    let mut ledger = ledger_with(1000);

    assert!(wardrobe.buy("shell-0", 500, &mut ledger));
    assert!(!wardrobe.buy("shell-0", 500, &mut ledger));
    assert_eq!(ledger.coins(), 500);
    assert!(!wardrobe.buy("default", 0, &mut ledger));
}

#[test]
fn test_select_requires_ownership() {
    let mut wardrobe = Wardrobe::default();
    assert!(!wardrobe.select("shell-3"));
    assert_eq!(wardrobe.selected(), "default");

    let mut ledger = ledger_with(2000);
    assert!(wardrobe.buy("shell-3", 2000, &mut ledger));
    assert!(wardrobe.select("shell-3"));
    assert_eq!(wardrobe.selected(), "shell-3");
}

#[test]
fn test_restore_repairs_ownership() {
    let wardrobe = Wardrobe::restore(vec!["shell-1".to_string()], "shell-7");
    assert!(wardrobe.owns("default"));
    assert!(wardrobe.owns("shell-1"));
    assert_eq!(wardrobe.selected(), "default");

    let wardrobe = Wardrobe::restore(vec!["shell-1".to_string()], "shell-1");
    assert_eq!(wardrobe.selected(), "shell-1");
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct Seen {
    purchased: Vec<String>,
    equipped: Vec<String>,
    denied: Vec<DenialReason>,
}

fn record(
    mut purchased: MessageReader<AvatarPurchasedEvent>,
    mut equipped: MessageReader<AvatarEquippedEvent>,
    mut denied: MessageReader<AvatarRequestDenied>,
    mut seen: ResMut<Seen>,
) {
    seen.purchased
        .extend(purchased.read().map(|e| e.avatar_id.clone()));
    seen.equipped
        .extend(equipped.read().map(|e| e.avatar_id.clone()));
    seen.denied.extend(denied.read().map(|e| e.reason));
}

fn avatars_app(coins: u64) -> App {
    let mut app = App::new();
    app.add_plugins((
        CorePlugin {
            session: SessionConfig::new("test", Some(1)),
        },
        RewardsPlugin,
        ProgressionPlugin,
        AvatarsPlugin,
    ))
    .insert_resource(ledger_with(coins))
    .init_resource::<Seen>()
    .add_systems(Update, record.in_set(LifeSet::Report));
    app
}

#[test]
fn test_buy_and_equip_requests() {
    let mut app = avatars_app(600);

    app.world_mut().write_message(BuyAvatarRequested {
        avatar_id: "shell-0".to_string(),
    });
    app.world_mut().write_message(SelectAvatarRequested {
        avatar_id: "shell-0".to_string(),
    });
    app.update();

    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.purchased, vec!["shell-0".to_string()]);
    assert_eq!(seen.equipped, vec!["shell-0".to_string()]);
    assert!(seen.denied.is_empty());
    assert_eq!(app.world().resource::<ProgressionLedger>().coins(), 100);
    assert_eq!(app.world().resource::<Wardrobe>().selected(), "shell-0");
}

#[test]
fn test_denied_requests_report_reason() {
    let mut app = avatars_app(100);

    for avatar_id in ["shell-0", "default", "nonsense"] {
        app.world_mut().write_message(BuyAvatarRequested {
            avatar_id: avatar_id.to_string(),
        });
    }
    app.world_mut().write_message(SelectAvatarRequested {
        avatar_id: "shell-2".to_string(),
    });
    app.update();

    let seen = app.world().resource::<Seen>();
    assert_eq!(
        seen.denied,
        vec![
            DenialReason::InsufficientCoins {
                price: 500,
                coins: 100
            },
            DenialReason::AlreadyOwned,
            DenialReason::UnknownAvatar,
            DenialReason::NotOwned,
        ]
    );
    assert_eq!(app.world().resource::<ProgressionLedger>().coins(), 100);
}
