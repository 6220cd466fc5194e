use pmosync::{
    AvailabilityFilter, MemoryCall, MemoryPlaylistService, RunMode, SyncPlan, Synchronizer,
    deduplicate_collection, merge,
};
use std::collections::BTreeSet;

fn inserts(calls: &[MemoryCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            MemoryCall::Insert(_, content_id) => Some(content_id.clone()),
            MemoryCall::Delete(_) => None,
        })
        .collect()
}

fn deletes(calls: &[MemoryCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            MemoryCall::Delete(entry_id) => Some(entry_id.clone()),
            MemoryCall::Insert(..) => None,
        })
        .collect()
}

fn identity_set(ids: Vec<String>) -> BTreeSet<String> {
    ids.into_iter().collect()
}

#[tokio::test]
async fn dedup_is_idempotent() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection(
        "PL",
        &[("A", None), ("B", None), ("A", None), ("C", None), ("B", None)],
    );
    let filter = AvailabilityFilter::default();

    deduplicate_collection(&service, &filter, "PL", RunMode::Apply).await?;
    let after_first = service.content_ids("PL");
    let calls_after_first = service.calls().len();

    let second = deduplicate_collection(&service, &filter, "PL", RunMode::Apply).await?;

    assert!(second.is_clean());
    assert_eq!(service.calls().len(), calls_after_first);
    assert_eq!(service.content_ids("PL"), after_first);
    Ok(())
}

#[tokio::test]
async fn first_occurrences_survive() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    let entries = service.add_collection(
        "PL",
        &[("A", None), ("B", None), ("A", None), ("C", None), ("B", None)],
    );

    deduplicate_collection(&service, &AvailabilityFilter::default(), "PL", RunMode::Apply)
        .await?;

    let surviving: Vec<String> = service
        .items("PL")
        .into_iter()
        .map(|item| item.entry_id)
        .collect();
    assert_eq!(
        surviving,
        vec![entries[0].clone(), entries[1].clone(), entries[3].clone()]
    );
    assert_eq!(
        deletes(&service.calls()),
        vec![entries[2].clone(), entries[4].clone()]
    );
    Ok(())
}

#[tokio::test]
async fn unavailable_duplicate_survives() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    let entries = service.add_collection("PL", &[("A", None), ("A", Some("Private video"))]);

    let outcome =
        deduplicate_collection(&service, &AvailabilityFilter::default(), "PL", RunMode::Apply)
            .await?;

    assert_eq!(outcome.skipped_unavailable[0].entry_id, entries[1]);
    assert!(deletes(&service.calls()).is_empty());
    assert_eq!(service.content_ids("PL"), vec!["A", "A"]);
    Ok(())
}

#[tokio::test]
async fn merge_adds_only_missing_identities() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[("X", None), ("Y", None)]);
    service.add_collection("source", &[("X", None), ("Z", None), ("W", None)]);

    merge(
        &service,
        &AvailabilityFilter::default(),
        "source",
        "target",
        RunMode::Apply,
    )
    .await?;

    let inserted = inserts(&service.calls());
    assert_eq!(inserted.len(), 2);
    assert!(!inserted.contains(&"X".to_string()));
    assert_eq!(
        identity_set(service.content_ids("target")),
        identity_set(vec!["X".into(), "Y".into(), "Z".into(), "W".into()])
    );
    Ok(())
}

#[tokio::test]
async fn merge_never_inserts_unavailable_items() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[]);
    service.add_collection(
        "source",
        &[("gone", Some("Deleted video")), ("ok", None)],
    );

    merge(
        &service,
        &AvailabilityFilter::default(),
        "source",
        "target",
        RunMode::Apply,
    )
    .await?;

    assert_eq!(inserts(&service.calls()), vec!["ok"]);
    Ok(())
}

#[tokio::test]
async fn sources_accumulate_without_double_insert() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[]);
    service.add_collection("first", &[("A", None), ("B", None)]);
    service.add_collection("second", &[("B", None), ("C", None)]);

    let report = Synchronizer::new(&service)
        .run(&SyncPlan::new(
            "target",
            vec!["first".to_string(), "second".to_string()],
        ))
        .await?;

    assert_eq!(inserts(&service.calls()), vec!["A", "B", "C"]);
    assert_eq!(report.after, vec!["A", "B", "C"]);
    assert_eq!(report.merges[1].already_present, vec!["B"]);
    Ok(())
}

#[tokio::test]
async fn no_sources_means_dedup_only() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[("A", None), ("B", None), ("A", None)]);

    let report = Synchronizer::new(&service)
        .run(&SyncPlan::new("target", Vec::new()))
        .await?;

    assert!(inserts(&service.calls()).is_empty());
    assert_eq!(deletes(&service.calls()).len(), 1);
    assert_eq!(report.before, vec!["A", "B", "A"]);
    assert_eq!(report.after, vec!["A", "B"]);
    assert!(report.merges.is_empty());
    Ok(())
}

#[tokio::test]
async fn run_converges_and_leaves_sources_untouched() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection(
        "target",
        &[("A", None), ("A", None), ("P", Some("Private video"))],
    );
    service.add_collection(
        "source",
        &[("B", None), ("B", None), ("D", Some("Deleted video")), ("A", None)],
    );
    let plan = SyncPlan::new("target", vec!["source".to_string()]);

    Synchronizer::new(&service).run(&plan).await?;
    let converged = service.content_ids("target");

    // A second run over a converged target changes nothing
    let calls = service.calls().len();
    let report = Synchronizer::new(&service).run(&plan).await?;

    assert_eq!(converged, vec!["A", "P", "B"]);
    assert_eq!(service.calls().len(), calls);
    assert_eq!(report.inserted_count(), 0);
    assert_eq!(service.content_ids("source"), vec!["B", "B", "D", "A"]);
    Ok(())
}

#[tokio::test]
async fn dry_run_plans_the_same_changes_without_sending_them() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[("A", None), ("A", None)]);
    service.add_collection("source", &[("B", None)]);
    let plan = SyncPlan::new("target", vec!["source".to_string()]);

    let report = Synchronizer::new(&service)
        .with_mode(RunMode::DryRun)
        .run(&plan)
        .await?;

    assert!(service.calls().is_empty());
    assert_eq!(report.dedup.removed.len(), 1);
    assert_eq!(report.merges[0].inserted, vec!["B"]);
    assert_eq!(report.after, report.before);
    Ok(())
}

#[tokio::test]
async fn dry_run_across_sources_matches_a_real_run() -> anyhow::Result<()> {
    let plan = SyncPlan::new("target", vec!["first".to_string(), "second".to_string()]);
    let service = || {
        let service = MemoryPlaylistService::new();
        service.add_collection("target", &[]);
        service.add_collection("first", &[("A", None), ("B", None)]);
        service.add_collection("second", &[("B", None), ("C", None)]);
        service
    };

    let rehearsal = service();
    let dry = Synchronizer::new(&rehearsal)
        .with_mode(RunMode::DryRun)
        .run(&plan)
        .await?;
    let live = service();
    let applied = Synchronizer::new(&live).run(&plan).await?;

    assert!(rehearsal.calls().is_empty());
    assert_eq!(dry.merges, applied.merges);
    assert_eq!(dry.inserted_count(), 3);
    assert_eq!(dry.merges[1].already_present, vec!["B"]);
    Ok(())
}

#[tokio::test]
async fn failure_mid_run_keeps_partial_changes() {
    let service = MemoryPlaylistService::new();
    service.add_collection("target", &[("A", None), ("A", None)]);
    service.add_collection("first", &[("B", None)]);
    service.add_collection("broken", &[("C", None)]);
    service.fail_list_after("broken", 0);

    let result = Synchronizer::new(&service)
        .run(&SyncPlan::new(
            "target",
            vec!["first".to_string(), "broken".to_string()],
        ))
        .await;

    assert!(result.is_err());
    // Dedup and the first merge were applied before the failure
    assert_eq!(service.content_ids("target"), vec!["A", "B"]);
}

#[tokio::test]
async fn custom_markers_protect_against_known_rejections() -> anyhow::Result<()> {
    let service = MemoryPlaylistService::new();
    service.reject_label("Unavailable video");
    service.add_collection(
        "target",
        &[("A", None), ("A", Some("Unavailable video"))],
    );

    // Without the marker the rejection aborts the run
    let err = Synchronizer::new(&service)
        .run(&SyncPlan::new("target", Vec::new()))
        .await
        .unwrap_err();
    assert!(err.is_not_accessible());

    // With the marker the duplicate is left in place
    let mut filter = AvailabilityFilter::default();
    filter.add_marker("Unavailable video");
    let report = Synchronizer::new(&service)
        .with_filter(filter)
        .run(&SyncPlan::new("target", Vec::new()))
        .await?;

    assert_eq!(report.dedup.skipped_unavailable.len(), 1);
    Ok(())
}
