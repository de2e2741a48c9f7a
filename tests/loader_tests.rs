use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;

use nba_game_viewer::render::{GameCard, Renderer};
use nba_game_viewer::{Controller, DateNavigator, FetchError, GameLoader, GameSource, LoadOutcome};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Date(String),
    Loading(bool),
    Games(Vec<GameCard>),
    Empty,
    Error,
}

#[derive(Default)]
struct RecordingRenderer {
    events: Mutex<Vec<Event>>,
    // Showing this label takes a while, like a slow repaint.
    slow_label: Option<&'static str>,
}

impl RecordingRenderer {
    fn slow_on(label: &'static str) -> Self {
        Self { events: Mutex::default(), slow_label: Some(label) }
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn show_date(&self, label: &str) {
        if self.slow_label == Some(label) {
            std::thread::sleep(Duration::from_millis(300));
        }
        self.push(Event::Date(label.to_string()));
    }
    fn set_loading(&self, loading: bool) {
        self.push(Event::Loading(loading));
    }
    fn render_games(&self, cards: &[GameCard]) {
        self.push(Event::Games(cards.to_vec()));
    }
    fn render_empty(&self) {
        self.push(Event::Empty);
    }
    fn render_error(&self) {
        self.push(Event::Error);
    }
}

enum Reply {
    Body(String),
    Unreachable,
}

/// Answers every request the same way and remembers the date parameters it was asked for.
struct FakeSource {
    reply: Reply,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    fn body(body: &str) -> Arc<Self> {
        Arc::new(Self { reply: Reply::Body(body.to_string()), requests: Mutex::default() })
    }

    fn failing(reply: Reply) -> Arc<Self> {
        Arc::new(Self { reply, requests: Mutex::default() })
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl GameSource for FakeSource {
    fn fetch(&self, date_param: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(date_param.to_string());
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Unreachable => Err(FetchError::Transport("connection refused".to_string())),
        }
    }
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn sample() -> String {
    std::fs::read_to_string("tests/sample_response.json").expect("failed to read sample_response.json")
}

fn loader_with(source: Arc<FakeSource>) -> (GameLoader<FakeSource, RecordingRenderer>, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    (GameLoader::new(source, Arc::clone(&renderer), Tz::UTC), renderer)
}

fn rendered_cards(events: &[Event]) -> Vec<GameCard> {
    events
        .iter()
        .rev()
        .find_map(|e| match e {
            Event::Games(cards) => Some(cards.clone()),
            _ => None,
        })
        .expect("expected rendered games")
}

#[tokio::test]
async fn keeps_only_games_on_the_requested_day() {
    let body = r#"{"data": [
        {"DateTime": "2025-01-16T10:00:00Z", "AwayTeam": "OKC", "HomeTeam": "CLE"},
        {"DateTime": "2025-01-17T10:00:00Z", "AwayTeam": "MIA", "HomeTeam": "NYK"}
    ]}"#;
    let (loader, renderer) = loader_with(FakeSource::body(body));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Rendered(1));

    let cards = rendered_cards(&renderer.events());
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].matchup(), "OKC vs CLE");
}

#[tokio::test]
async fn single_object_data_is_rendered_as_one_card() {
    let body = r#"{"data": {"DateTime": "2025-01-16T23:00:00Z", "AwayTeam": "LAL", "HomeTeam": "DEN", "Status": "Scheduled"}}"#;
    let (loader, renderer) = loader_with(FakeSource::body(body));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Rendered(1));
    assert_eq!(rendered_cards(&renderer.events())[0].status, "Scheduled");
}

#[tokio::test]
async fn missing_data_field_renders_empty_state() {
    let (loader, renderer) = loader_with(FakeSource::body("{}"));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Empty);
    assert_eq!(renderer.events(), vec![Event::Loading(true), Event::Empty, Event::Loading(false)]);
}

#[tokio::test]
async fn no_games_on_the_day_renders_empty_state() {
    let (loader, renderer) = loader_with(FakeSource::body(&sample()));

    assert_eq!(loader.load_games_for_date(jan(20)).await, LoadOutcome::Empty);
    assert_eq!(renderer.events().last(), Some(&Event::Loading(false)));
    assert!(renderer.events().contains(&Event::Empty));
}

#[tokio::test]
async fn network_failure_renders_error_and_hides_loader() {
    let (loader, renderer) = loader_with(FakeSource::failing(Reply::Unreachable));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Failed);
    assert_eq!(renderer.events(), vec![Event::Loading(true), Event::Error, Event::Loading(false)]);
}

#[tokio::test]
async fn non_json_body_is_a_failure() {
    let (loader, renderer) = loader_with(FakeSource::body("<html>Bad Gateway</html>"));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Failed);
    assert_eq!(renderer.events(), vec![Event::Loading(true), Event::Error, Event::Loading(false)]);
}

#[tokio::test]
async fn json_error_body_without_data_renders_empty_state() {
    // What the endpoint answers (with a 500 status) when its own backing store fails.
    let (loader, renderer) = loader_with(FakeSource::body(r#"{"error": "Failed to fetch data"}"#));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Empty);
    assert_eq!(renderer.events(), vec![Event::Loading(true), Event::Empty, Event::Loading(false)]);
}

#[tokio::test]
async fn missing_fields_get_placeholders() {
    let (loader, renderer) = loader_with(FakeSource::body(&sample()));

    assert_eq!(loader.load_games_for_date(jan(16)).await, LoadOutcome::Rendered(2));
    let cards = rendered_cards(&renderer.events());
    assert_eq!(cards[0].channel, "ESPN");
    // Empty channel string
    assert_eq!(cards[1].channel, "TBD");

    let feb_first = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    assert_eq!(loader.load_games_for_date(feb_first).await, LoadOutcome::Rendered(1));
    let card = &rendered_cards(&renderer.events())[0];
    assert_eq!(card.matchup(), "TBD vs GSW");
    assert_eq!(card.start_time, "TBD");
    assert_eq!(card.channel, "TBD");
    assert_eq!(card.status, "Scheduled");
}

#[tokio::test]
async fn sends_midnight_of_the_date_as_utc_timestamp() {
    let source = FakeSource::body("{}");
    let (loader, _) = loader_with(Arc::clone(&source));
    loader.load_games_for_date(jan(16)).await;

    let chicago: Tz = "America/Chicago".parse().unwrap();
    let renderer = Arc::new(RecordingRenderer::default());
    let central = GameLoader::new(Arc::clone(&source), renderer, chicago);
    central.load_games_for_date(jan(16)).await;

    assert_eq!(source.requests(), vec!["2025-01-16T00:00:00.000Z", "2025-01-16T06:00:00.000Z"]);
}

/// Answers slowly for one date so a later request can overtake it.
struct SlowForDate {
    slow_prefix: &'static str,
    body: String,
}

impl GameSource for SlowForDate {
    fn fetch(&self, date_param: &str) -> Result<String, FetchError> {
        if date_param.starts_with(self.slow_prefix) {
            std::thread::sleep(Duration::from_millis(300));
        }
        Ok(self.body.clone())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_response_is_discarded() {
    let source = Arc::new(SlowForDate { slow_prefix: "2025-01-16", body: sample() });
    let renderer = Arc::new(RecordingRenderer::default());
    let loader = Arc::new(GameLoader::new(source, Arc::clone(&renderer), Tz::UTC));

    let first = {
        let loader = Arc::clone(&loader);
        tokio::spawn(async move { loader.load_games_for_date(jan(16)).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = loader.load_games_for_date(jan(17)).await;

    assert_eq!(second, LoadOutcome::Rendered(1));
    assert_eq!(first.await.unwrap(), LoadOutcome::Stale);

    let events = renderer.events();
    let renders: Vec<&Event> = events.iter().filter(|e| matches!(e, Event::Games(_))).collect();
    assert_eq!(renders.len(), 1, "events were: {:?}", events);
    assert_eq!(rendered_cards(&events)[0].matchup(), "MIA vs NYK");
    assert_eq!(events.last(), Some(&Event::Loading(false)));
}

#[tokio::test]
async fn controller_shows_date_before_loading() {
    let renderer = Arc::new(RecordingRenderer::default());
    let controller = Controller::new(DateNavigator::default(), FakeSource::body(&sample()), Arc::clone(&renderer), Tz::UTC);

    assert_eq!(controller.start().await, LoadOutcome::Rendered(2));
    let events = renderer.events();
    assert_eq!(events[0], Event::Date("January 16, 2025".to_string()));
    assert_eq!(events[1], Event::Loading(true));
}

#[tokio::test]
async fn controller_navigates_across_month_boundary() {
    let source = FakeSource::body(&sample());
    let renderer = Arc::new(RecordingRenderer::default());
    let controller = Controller::new(DateNavigator::new(jan(31)), Arc::clone(&source), Arc::clone(&renderer), Tz::UTC);

    assert_eq!(controller.next().await, LoadOutcome::Rendered(1));
    assert_eq!(controller.current_date(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert!(renderer.events().contains(&Event::Date("February 1, 2025".to_string())));

    assert_eq!(controller.previous().await, LoadOutcome::Rendered(1));
    assert_eq!(controller.current_date(), jan(31));
    assert_eq!(rendered_cards(&renderer.events())[0].matchup(), "DEN vs PHX");

    assert_eq!(controller.refresh().await, LoadOutcome::Rendered(1));
    assert_eq!(source.requests().len(), 3);
}

fn games_on_17th_and_18th() -> String {
    r#"{"data": [
        {"DateTime": "2025-01-17T19:00:00", "AwayTeam": "MIA", "HomeTeam": "NYK"},
        {"DateTime": "2025-01-18T19:00:00", "AwayTeam": "DAL", "HomeTeam": "SAS"}
    ]}"#
        .to_string()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_navigation_settles_on_the_latest_date() {
    let source = Arc::new(SlowForDate { slow_prefix: "2025-01-17", body: games_on_17th_and_18th() });
    let renderer = Arc::new(RecordingRenderer::slow_on("January 17, 2025"));
    let controller = Arc::new(Controller::new(DateNavigator::new(jan(16)), source, Arc::clone(&renderer), Tz::UTC));

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.next().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.next().await })
    };

    assert_eq!(second.await.unwrap(), LoadOutcome::Rendered(1));
    assert_eq!(first.await.unwrap(), LoadOutcome::Stale);
    assert_eq!(controller.current_date(), jan(18));

    let events = renderer.events();
    let last_date = events.iter().rev().find_map(|e| match e {
        Event::Date(label) => Some(label.as_str()),
        _ => None,
    });
    assert_eq!(last_date, Some("January 18, 2025"), "events were: {:?}", events);
    assert_eq!(rendered_cards(&events)[0].matchup(), "DAL vs SAS", "events were: {:?}", events);
    assert_eq!(events.iter().filter(|e| matches!(e, Event::Games(_))).count(), 1, "events were: {:?}", events);
    assert_eq!(events.last(), Some(&Event::Loading(false)));
}
