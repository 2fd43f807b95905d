//! Integration tests for the activation results pipeline.
//!
//! Requires a live PostgreSQL pointed to by `DATABASE_URL`; each test
//! skips itself when the variable is unset.

use chrono::{Duration, Utc};
use curio_db::test_fixtures::TestDatabase;
use curio_search::{ActivationResultsAssembler, CountSettings, SearchParams, REGION_BULK_SELECT};

macro_rules! require_db {
    () => {{
        dotenvy::dotenv().ok();
        match TestDatabase::connect().await {
            Some(db) => db,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            }
        }
    }};
}

#[tokio::test]
async fn page_lists_only_items_active_at_instant() {
    let t = require_db!();
    let inst = t.institution().await;
    let now = Utc::now();

    let covered = t.item(inst.id, None).await;
    t.activation(covered.id, now - Duration::hours(1), now + Duration::hours(1))
        .await;

    let ended = t.item(inst.id, None).await;
    t.activation(ended.id, now - Duration::days(2), now - Duration::days(1))
        .await;

    let assembler = ActivationResultsAssembler::new(t.db.clone(), CountSettings::default());
    let page = assembler
        .assemble(
            SearchParams::default_params()
                .for_institution(inst.id)
                .activation_scoped(now),
            false,
        )
        .await
        .unwrap();

    assert_eq!(page.title, "Activations");
    assert_eq!(page.update_regions, vec![REGION_BULK_SELECT.to_string()]);
    assert_eq!(page.total, 1);
    assert_eq!(page.entries[0].item.id, covered.id);

    t.cleanup().await;
}

#[tokio::test]
async fn entries_carry_image_count_badges() {
    let t = require_db!();
    let inst = t.institution().await;
    let now = Utc::now();

    let item = t.item(inst.id, None).await;
    t.activation(item.id, now - Duration::hours(1), now + Duration::hours(1))
        .await;
    t.file_attachment(item.id, "front.jpg", false).await;
    t.file_attachment(item.id, "back.png", false).await;
    t.file_attachment(item.id, "secret.gif", true).await;
    t.file_attachment(item.id, "syllabus.pdf", false).await;

    let assembler = ActivationResultsAssembler::new(t.db.clone(), CountSettings::default());
    let params = SearchParams::default_params()
        .for_institution(inst.id)
        .activation_scoped(now);

    // Unprivileged viewer: restricted image excluded, two remain.
    let page = assembler.assemble(params.clone(), false).await.unwrap();
    let badge = page.entries[0]
        .image_count_badge
        .as_ref()
        .expect("badge expected");
    assert_eq!(badge.count, 2);
    assert_eq!(badge.title, "2 images");

    // Privileged viewer sees all three.
    let page = assembler.assemble(params, true).await.unwrap();
    assert_eq!(page.entries[0].image_count_badge.as_ref().unwrap().count, 3);

    t.cleanup().await;
}

#[tokio::test]
async fn zero_limit_yields_empty_page_with_total() {
    let t = require_db!();
    let inst = t.institution().await;
    let now = Utc::now();

    let item = t.item(inst.id, None).await;
    t.activation(item.id, now - Duration::hours(1), now + Duration::hours(1))
        .await;

    let assembler = ActivationResultsAssembler::new(t.db.clone(), CountSettings::default());
    let page = assembler
        .assemble(
            SearchParams::default_params()
                .for_institution(inst.id)
                .activation_scoped(now)
                .page(0, 0),
            false,
        )
        .await
        .unwrap();

    // An explicit limit of zero is a count-only request, not one entry.
    assert!(page.entries.is_empty());
    assert_eq!(page.total, 1);

    t.cleanup().await;
}

#[tokio::test]
async fn counting_disabled_suppresses_all_badges() {
    let t = require_db!();
    let inst = t.institution().await;
    let now = Utc::now();

    let item = t.item(inst.id, None).await;
    t.activation(item.id, now - Duration::hours(1), now + Duration::hours(1))
        .await;
    t.file_attachment(item.id, "a.jpg", false).await;
    t.file_attachment(item.id, "b.jpg", false).await;

    let assembler =
        ActivationResultsAssembler::new(t.db.clone(), CountSettings { enabled: false });
    let page = assembler
        .assemble(
            SearchParams::default_params()
                .for_institution(inst.id)
                .activation_scoped(now),
            true,
        )
        .await
        .unwrap();

    assert!(page.entries[0].image_count_badge.is_none());

    t.cleanup().await;
}
