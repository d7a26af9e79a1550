use super::*;
use crate::error::AssetsPlusError;
use crate::search::MatchTier;

fn raw(path: &str) -> RawFile {
    RawFile::new(path, Some(4096))
}

fn listing() -> Vec<RawFile> {
    vec![
        raw("/graph/assets/a.pdf"),
        raw("/graph/assets/b.png"),
        raw("/graph/assets/c.mp3"),
        raw("/graph/assets/1693000000000_photo.png"),
        raw("/graph/assets/notes.txt"),
    ]
}

fn ready_session(config: &PickerConfig, raws: Vec<RawFile>) -> Session {
    let mut session = Session::new(config);
    let ticket = session.open().expect("open from Closed yields a ticket");
    let applied = session.complete_fetch(ticket, Ok(raws)).unwrap();
    assert!(matches!(applied, FetchApplied::Loaded { .. }));
    session
}

fn names(session: &Session) -> Vec<String> {
    session
        .displayed_results()
        .iter()
        .map(|r| r.item.name.clone())
        .collect()
}

// ============================================
// LIFECYCLE
// ============================================

#[test]
fn test_lifecycle_phases() {
    let mut session = Session::new(&PickerConfig::default());
    assert_eq!(session.phase(), Phase::Closed);
    assert!(session.request_open());
    assert_eq!(session.phase(), Phase::Opening);
    assert!(session.is_loading());
    let ticket = session.begin_fetch().unwrap();
    assert_eq!(session.phase(), Phase::Loading);
    assert!(session.displayed_results().is_empty());
    session.complete_fetch(ticket, Ok(listing())).unwrap();
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.total_count(), 5);
    session.close();
    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(session.total_count(), 0);
}

#[test]
fn test_repeated_open_is_noop() {
    let mut session = Session::new(&PickerConfig::default());
    let ticket = session.open().unwrap();
    assert!(session.open().is_none());
    assert!(!session.request_open());
    assert_eq!(session.phase(), Phase::Loading);

    session.complete_fetch(ticket, Ok(listing())).unwrap();
    assert!(session.open().is_none());
    assert_eq!(session.phase(), Phase::Ready);
}

#[test]
fn test_fetch_after_close_is_discarded() {
    let mut session = Session::new(&PickerConfig::default());
    let ticket = session.open().unwrap();
    session.close();
    let applied = session.complete_fetch(ticket, Ok(listing())).unwrap();
    assert_eq!(applied, FetchApplied::Stale);
    assert_eq!(session.phase(), Phase::Closed);
}

#[test]
fn test_stale_fetch_does_not_populate_newer_session() {
    let mut session = Session::new(&PickerConfig::default());
    let old = session.open().unwrap();
    session.close();
    let new = session.open().unwrap();
    assert_ne!(old, new);

    assert_eq!(
        session.complete_fetch(old, Ok(listing())).unwrap(),
        FetchApplied::Stale
    );
    assert_eq!(session.phase(), Phase::Loading);

    let applied = session
        .complete_fetch(new, Ok(vec![raw("/graph/assets/z.png")]))
        .unwrap();
    assert_eq!(applied, FetchApplied::Loaded { items: 1 });
    assert_eq!(names(&session), vec!["z.png"]);
}

#[test]
fn test_fetch_failure_yields_empty_ready() {
    let mut session = Session::new(&PickerConfig::default());
    let ticket = session.open().unwrap();
    let err = session
        .complete_fetch(ticket, Err(AssetsPlusError::Fetch("no graph".to_string())))
        .unwrap_err();
    assert!(matches!(err, AssetsPlusError::Fetch(_)));
    assert_eq!(session.phase(), Phase::Ready);
    assert!(session.displayed_results().is_empty());
    assert!(session.commit().is_none());
}

#[test]
fn test_input_while_loading_is_discarded() {
    let mut session = Session::new(&PickerConfig::default());
    let ticket = session.open().unwrap();
    assert!(!session.set_query("photo"));
    assert!(!session.set_category(Category::Books));
    assert!(!session.cycle_category(Direction::Next));
    assert!(!session.move_cursor(Direction::Next));
    assert!(session.commit().is_none());

    session.complete_fetch(ticket, Ok(listing())).unwrap();
    assert_eq!(session.query(), "");
    assert_eq!(session.active_category(), Category::All);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.displayed_results().len(), 5);
}

// ============================================
// QUERY, CATEGORY, CURSOR
// ============================================

#[test]
fn test_empty_query_shows_first_window_unranked() {
    let raws: Vec<RawFile> = (0..12)
        .map(|i| raw(&format!("/graph/assets/img{}.png", i)))
        .collect();
    let session = ready_session(&PickerConfig::default(), raws);
    let results = session.displayed_results();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0].item.name, "img0.png");
    assert_eq!(results[7].item.name, "img7.png");
    assert!(results.iter().all(|r| r.ranges.is_empty() && r.tier.is_none()));
}

#[test]
fn test_books_tab_shows_only_pdf() {
    let mut session = ready_session(
        &PickerConfig::default(),
        vec![
            raw("/graph/assets/a.pdf"),
            raw("/graph/assets/b.png"),
            raw("/graph/assets/c.mp3"),
        ],
    );
    assert!(session.set_category(Category::Books));
    assert_eq!(names(&session), vec!["a.pdf"]);
}

#[test]
fn test_query_change_resets_cursor() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.move_cursor(Direction::Next);
    session.move_cursor(Direction::Next);
    assert_eq!(session.cursor(), 2);
    session.set_query("png");
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_category_change_resets_cursor() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.move_cursor(Direction::Prev);
    assert_eq!(session.cursor(), 4);
    session.cycle_category(Direction::Next);
    assert_eq!(session.active_category(), Category::Books);
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_refresh_resets_cursor_and_stays_in_bounds() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.move_cursor(Direction::Prev);
    assert!(session.refresh_source(vec![raw("/graph/assets/only.png")]));
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.displayed_results().len(), 1);
}

#[test]
fn test_cursor_wraps() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.move_cursor(Direction::Prev);
    assert_eq!(session.cursor(), 4);
    session.move_cursor(Direction::Next);
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_exact_name_ranks_first_in_session() {
    let mut session = ready_session(
        &PickerConfig::default(),
        vec![
            raw("/graph/assets/my photo.png"),
            raw("/graph/assets/photo.png.png"),
            raw("/graph/assets/photo_1693912345678_0.png"),
        ],
    );
    session.set_query("photo.png");
    let results = session.displayed_results();
    assert_eq!(results[0].item.name, "photo.png");
    assert_eq!(results[0].tier, Some(MatchTier::Exact));
}

#[test]
fn test_fuzzy_query_highlights_display_name() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_query("pht");
    let results = session.displayed_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.name, "photo.png");
    let joined: String = results[0].segments().iter().map(|s| s.text).collect();
    assert_eq!(joined, "photo.png");
}

#[test]
fn test_video_tab_only_with_capability() {
    let session = ready_session(&PickerConfig::default(), listing());
    assert!(!session.tabs().contains(&Category::Videos));

    let mut config = PickerConfig::default();
    config.capabilities.video = true;
    let mut session = ready_session(
        &config,
        vec![raw("/graph/assets/clip.mp4"), raw("/graph/assets/a.pdf")],
    );
    assert_eq!(session.tabs().last(), Some(&Category::Videos));
    session.cycle_category(Direction::Prev);
    assert_eq!(session.active_category(), Category::Videos);
    assert_eq!(names(&session), vec!["clip.mp4"]);
}

// ============================================
// COMMIT AND DISMISS
// ============================================

#[test]
fn test_commit_inserts_link_and_closes() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_query("photo");
    let commit = session.commit().unwrap();
    assert_eq!(commit.item.name, "photo.png");
    assert_eq!(
        commit.action,
        CommitAction::InsertLink(Some(
            "![photo.png](assets/1693000000000_photo.png)".to_string()
        ))
    );
    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(session.query(), "");
}

#[test]
fn test_commit_plain_reference_for_other_formats() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_query("notes");
    let commit = session.commit().unwrap();
    assert_eq!(
        commit.action,
        CommitAction::InsertLink(Some("[notes.txt](assets/notes.txt)".to_string()))
    );
}

#[test]
fn test_commit_in_full_features_mode_opens_externally() {
    let mut config = PickerConfig::default();
    config.capabilities.full_features = true;
    let mut session = ready_session(&config, listing());
    session.set_query("a.pdf");
    let commit = session.commit().unwrap();
    assert_eq!(
        commit.action,
        CommitAction::OpenExternal("file:///graph/assets/a.pdf".to_string())
    );
    assert_eq!(session.phase(), Phase::Ready);
}

#[test]
fn test_commit_with_no_results_is_noop() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_query("zzzz");
    assert!(session.commit().is_none());
    assert_eq!(session.phase(), Phase::Ready);
}

#[test]
fn test_dismiss_clears_query_then_closes() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_category(Category::Images);
    session.set_query("photo");
    session.dismiss();
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.query(), "");
    session.dismiss();
    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(session.active_category(), Category::All);
}

#[test]
fn test_reopen_starts_fresh() {
    let mut session = ready_session(&PickerConfig::default(), listing());
    session.set_query("pdf");
    session.set_category(Category::Books);
    session.close();
    let ticket = session.open().unwrap();
    assert_eq!(session.query(), "");
    assert_eq!(session.active_category(), Category::All);
    assert!(session.displayed_results().is_empty());
    session.complete_fetch(ticket, Ok(listing())).unwrap();
    assert_eq!(session.displayed_results().len(), 5);
}
