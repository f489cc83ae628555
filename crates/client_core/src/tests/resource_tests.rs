use super::*;

fn server_error(message: &str) -> GatewayError {
    GatewayError::Status {
        status: 500,
        message: Some(message.to_string()),
    }
}

#[test]
fn starts_idle() {
    let resource = AsyncResource::<u32>::new();
    assert_eq!(resource.phase(), Phase::Idle);
    assert!(!resource.is_loading());
    assert!(resource.error().is_none());
    assert!(resource.data().is_none());
}

#[test]
fn success_sets_data_and_clears_loading() {
    let mut resource = AsyncResource::new();
    let token = resource.begin(DataPolicy::Retain);
    assert_eq!(resource.phase(), Phase::Loading);

    assert!(resource.resolve(token, Ok(5)));
    assert_eq!(resource.data(), Some(&5));
    assert!(!resource.is_loading());
    assert_eq!(resource.phase(), Phase::Success);
}

#[test]
fn failure_keeps_retained_data_and_reports_server_message() {
    let mut resource = AsyncResource::new();
    let first = resource.begin(DataPolicy::Retain);
    resource.resolve(first, Ok(vec![1, 2]));

    let second = resource.begin(DataPolicy::Retain);
    assert_eq!(resource.data(), Some(&vec![1, 2]));
    resource.resolve(second, Err(server_error("boom")));

    assert_eq!(resource.error(), Some("boom"));
    assert_eq!(resource.data(), Some(&vec![1, 2]));
    assert_eq!(resource.phase(), Phase::Failure);
    assert!(!resource.is_loading());
}

#[test]
fn clear_policy_drops_previous_payload_up_front() {
    let mut resource = AsyncResource::new();
    let first = resource.begin(DataPolicy::Clear);
    resource.resolve(first, Ok("old"));

    let second = resource.begin(DataPolicy::Clear);
    assert!(resource.data().is_none());
    resource.resolve(second, Err(GatewayError::Transport("refused".into())));
    assert!(resource.data().is_none());
    assert_eq!(resource.error(), Some("network error: refused"));
}

#[test]
fn begin_clears_previous_error() {
    let mut resource = AsyncResource::<()>::new();
    let token = resource.begin(DataPolicy::Retain);
    resource.resolve(token, Err(server_error("nope")));
    assert!(resource.error().is_some());

    resource.begin(DataPolicy::Retain);
    assert!(resource.error().is_none());
    assert!(resource.is_loading());
}

#[test]
fn out_of_order_responses_settle_on_the_newest() {
    let mut resource = AsyncResource::new();
    let first = resource.begin(DataPolicy::Retain);
    let second = resource.begin(DataPolicy::Retain);

    assert!(resource.resolve(second, Ok("fresh")));
    assert!(!resource.is_loading());

    assert!(!resource.resolve(first, Ok("stale")));
    assert_eq!(resource.data(), Some(&"fresh"));
    assert!(!resource.is_loading());
}

#[test]
fn in_order_responses_wait_for_the_newest() {
    let mut resource = AsyncResource::new();
    let first = resource.begin(DataPolicy::Retain);
    let second = resource.begin(DataPolicy::Retain);

    assert!(!resource.resolve(first, Ok(1)));
    assert!(resource.is_loading());
    assert!(resource.resolve(second, Ok(2)));
    assert_eq!(resource.data(), Some(&2));
    assert!(!resource.is_loading());
}

#[test]
fn reset_makes_in_flight_requests_stale() {
    let mut resource = AsyncResource::new();
    let token = resource.begin(DataPolicy::Retain);
    resource.reset();
    assert!(!resource.resolve(token, Ok(9)));
    assert_eq!(resource.phase(), Phase::Idle);
}

#[test]
fn tokens_are_unique_across_resources() {
    let mut left = AsyncResource::<()>::new();
    let mut right = AsyncResource::<()>::new();
    let left_token = left.begin(DataPolicy::Retain);
    let right_token = right.begin(DataPolicy::Retain);
    assert_ne!(left_token, right_token);
    assert!(!right.resolve(left_token, Ok(())));
}

#[test]
fn local_failure_does_not_start_a_request() {
    let mut resource = AsyncResource::<()>::new();
    resource.fail_local("Please enter a topic to analyze");
    assert!(!resource.is_loading());
    assert_eq!(resource.error(), Some("Please enter a topic to analyze"));
    resource.clear_error();
    assert_eq!(resource.phase(), Phase::Idle);
}

#[test]
fn local_failure_is_ignored_while_loading() {
    let mut resource = AsyncResource::<u32>::new();
    let token = resource.begin(DataPolicy::Retain);
    assert!(!resource.fail_local("username is required"));
    assert!(resource.is_loading());
    assert_eq!(resource.error(), None);

    assert!(resource.resolve(token, Ok(1)));
    assert!(resource.fail_local("username is required"));
    assert_eq!(resource.phase(), Phase::Failure);
}

#[tokio::test]
async fn run_drives_the_full_cycle() {
    let mut resource = AsyncResource::new();
    let applied = resource
        .run(DataPolicy::Retain, async { Ok::<_, GatewayError>(42) })
        .await;
    assert!(applied);
    assert_eq!(resource.data(), Some(&42));
    assert!(!resource.is_loading());
}
