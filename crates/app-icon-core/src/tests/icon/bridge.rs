use crate::{
    CompletionDelivery, CoreResult, IconBridge, IconChangeCompletion, IconErrorKind, IconManifest,
    IconName, IconPlatform, IconSetter, SimulatedPlatform,
};

use std::time::Duration;

/// Host that accepts every request but releases the completion unanswered.
struct DroppingPlatform;

struct DroppingSetter;

impl IconSetter for DroppingSetter {
    fn set_alternate_icon_name(&self, _name: Option<&str>, completion: IconChangeCompletion) {
        drop(completion);
    }
}

impl IconPlatform for DroppingPlatform {
    type Setter = DroppingSetter;

    fn supports_alternate_icons(&self) -> bool {
        true
    }

    fn alternate_icon_name(&self) -> Option<String> {
        None
    }

    fn packaged_alternate_icons(&self) -> CoreResult<Vec<String>> {
        Ok(vec!["red".to_string()])
    }

    fn resolve_icon_setter(&self) -> CoreResult<Self::Setter> {
        Ok(DroppingSetter)
    }
}

fn red_gray_bridge() -> IconBridge<SimulatedPlatform> {
    IconBridge::new(SimulatedPlatform::new(IconManifest::from_names([
        "red", "gray",
    ])))
}

/// WHAT: Unsupported host fails fast without touching the mechanism
/// WHY: The capability check must run before any host request
#[tokio::test]
async fn given_unsupported_platform_when_setting_icon_then_unsupported_and_not_invoked() {
    // Given: A host without alternate icon support
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"])).with_support(false),
    );

    // When: Requesting any icon, DEFAULT included
    let red = bridge.set_icon("red").await;
    let default = bridge.set_icon(IconName::DEFAULT).await;

    // Then: Both fail with UnsupportedPlatform and the setter never ran
    assert!(!bridge.supports_alternate_icons());
    assert!(matches!(
        red.map_err(|e| e.kind()),
        Err(IconErrorKind::UnsupportedPlatform)
    ));
    assert!(matches!(
        default.map_err(|e| e.kind()),
        Err(IconErrorKind::UnsupportedPlatform)
    ));
    assert_eq!(bridge.platform().setter_invocations(), 0);
}

/// WHAT: The red/gray walkthrough end to end
/// WHY: Covers listing, switching, rejection and reset in one flow
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_red_gray_configuration_when_switching_then_host_follows() {
    // Given: Icons red and gray packaged
    let bridge = red_gray_bridge();

    // When/Then: Listing puts DEFAULT first
    let listed: Vec<String> = bridge
        .available_icons()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(listed, vec!["DEFAULT", "red", "gray"]);

    // When/Then: Switching to red resolves red and the host shows red
    assert_eq!(bridge.set_icon("red").await.unwrap(), "red");
    assert_eq!(bridge.current_icon(), "red");

    // When/Then: Unregistered blue is rejected by the host, red stays
    let blue = bridge.set_icon("blue").await;
    assert!(matches!(
        blue.map_err(|e| e.kind()),
        Err(IconErrorKind::PlatformRejected)
    ));
    assert_eq!(bridge.current_icon(), "red");

    // When/Then: DEFAULT resolves DEFAULT and clears the alternate
    let reset = bridge.set_icon("DEFAULT").await.unwrap();
    assert!(reset.is_default());
    assert_eq!(bridge.current_icon(), IconName::DEFAULT);
    assert_eq!(bridge.platform().alternate_icon_name(), None);
}

/// WHAT: Rejection keeps the host's message
/// WHY: Users see why the switch failed
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unregistered_icon_when_setting_then_host_message_preserved() {
    // Given: Icons red and gray packaged
    let bridge = red_gray_bridge();

    // When: Requesting an icon the host does not know
    let error = bridge.set_icon("blue").await.unwrap_err();

    // Then: The host message is carried in the error
    assert_eq!(error.kind(), IconErrorKind::PlatformRejected);
    assert!(error.to_string().contains("blue"));
}

/// WHAT: Redundant switches succeed with the same result
/// WHY: Switching to the active icon is not an error
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_same_icon_twice_when_setting_then_same_result() {
    // Given: Icons red and gray packaged
    let bridge = red_gray_bridge();

    // When: Requesting gray twice in a row
    let first = bridge.set_icon("gray").await.unwrap();
    let second = bridge.set_icon("gray").await.unwrap();

    // Then: Both resolve gray, one host request each
    assert_eq!(first, second);
    assert_eq!(bridge.platform().setter_invocations(), 2);
}

/// WHAT: Missing mechanism surfaces as MechanismUnavailable
/// WHY: A removed private API must not crash the app
#[tokio::test]
async fn given_missing_mechanism_when_setting_icon_then_mechanism_unavailable() {
    // Given: A supported host whose switch procedure is gone
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"])).with_mechanism(false),
    );

    // When: Requesting red
    let result = bridge.set_icon("red").await;

    // Then: MechanismUnavailable and the icon unchanged
    assert!(matches!(
        result.map_err(|e| e.kind()),
        Err(IconErrorKind::MechanismUnavailable)
    ));
    assert!(bridge.current_icon().is_default());
}

/// WHAT: current_icon re-queries the host every time
/// WHY: The OS can change the icon outside this bridge
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_external_change_when_reading_current_then_host_value_returned() {
    // Given: The bridge switched to red
    let bridge = red_gray_bridge();
    bridge.set_icon("red").await.unwrap();

    // When: The host changes to gray on its own
    bridge.platform().set_external_icon(Some("gray"));

    // Then: The bridge reports gray, not the last value it set
    assert_eq!(bridge.current_icon(), "gray");
}

/// WHAT: DEFAULT is listed first even with no alternates
/// WHY: The primary icon is always selectable
#[test]
fn given_empty_configuration_when_listing_then_only_default() {
    // Given: No packaged alternates
    let bridge = IconBridge::new(SimulatedPlatform::new(IconManifest::default()));

    // When: Listing
    let icons = bridge.available_icons();

    // Then: Only DEFAULT
    assert_eq!(icons, vec![IconName::DEFAULT]);
}

/// WHAT: Unreadable configuration degrades to DEFAULT only
/// WHY: Listing must not fail
#[test]
fn given_unreadable_configuration_when_listing_then_only_default() {
    // Given: A host whose packaged list cannot be read
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"]))
            .with_unreadable_configuration("Info.plist damaged"),
    );

    // When: Listing
    let icons = bridge.available_icons();

    // Then: Only DEFAULT
    assert_eq!(icons, vec![IconName::DEFAULT]);
}

/// WHAT: Reserved, empty and duplicate packaged names are skipped
/// WHY: DEFAULT must appear exactly once, at the front
#[test]
fn given_reserved_and_duplicate_names_when_listing_then_skipped() {
    // Given: A configuration that misuses DEFAULT and repeats red
    let bridge = IconBridge::new(SimulatedPlatform::new(IconManifest::from_names([
        "red", "DEFAULT", "", "red", "gray",
    ])));

    // When: Listing
    let icons = bridge.available_icons();

    // Then: DEFAULT once, then red and gray in order
    assert_eq!(
        icons,
        vec![IconName::DEFAULT, IconName::from("red"), IconName::from("gray")]
    );
}

/// WHAT: Unsupported host reports DEFAULT as current
/// WHY: current_icon never fails
#[test]
fn given_unsupported_platform_when_reading_current_then_default() {
    // Given: A host without support that still holds stale state
    let platform = SimulatedPlatform::new(IconManifest::from_names(["red"])).with_support(false);
    platform.set_external_icon(Some("red"));
    let bridge = IconBridge::new(platform);

    // When/Then: DEFAULT
    assert!(bridge.current_icon().is_default());
}

/// WHAT: Deferred host answers still resolve the request
/// WHY: UIKit answers asynchronously
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_deferred_delivery_when_setting_icon_then_resolves_after_answer() {
    // Given: A host answering after 20ms
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"]))
            .with_delivery(CompletionDelivery::Deferred(Duration::from_millis(20))),
    );

    // When: Requesting red
    let active = bridge.set_icon("red").await.unwrap();

    // Then: Resolved red after the host applied it
    assert_eq!(active, "red");
    assert_eq!(bridge.current_icon(), "red");
}

/// WHAT: A host that never answers leaves the request pending
/// WHY: No timeout is imposed by the bridge
#[tokio::test]
async fn given_silent_host_when_setting_icon_then_request_never_settles() {
    // Given: A host that never answers
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"]))
            .with_delivery(CompletionDelivery::Never),
    );

    // When: Waiting briefly for the request
    let waited = tokio::time::timeout(Duration::from_millis(50), bridge.set_icon("red")).await;

    // Then: Still pending, and exactly one host request was issued
    assert!(waited.is_err());
    assert_eq!(bridge.platform().setter_invocations(), 1);
}

/// WHAT: Blocking adapter returns the active icon on success
/// WHY: Legacy callers get a direct value
#[test]
fn given_registered_icon_when_setting_blocking_then_icon_returned() {
    // Given: Icons red and gray, answered from another thread
    let bridge = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red", "gray"]))
            .with_delivery(CompletionDelivery::Deferred(Duration::from_millis(10))),
    );

    // When: Switching with the blocking adapter
    let red = bridge.set_icon_blocking("red");
    let reset = bridge.set_icon_blocking(IconName::DEFAULT);

    // Then: Active icons come back directly
    assert_eq!(red, Some(IconName::from("red")));
    assert_eq!(reset, Some(IconName::DEFAULT));
}

/// WHAT: Blocking adapter failure is distinct from DEFAULT
/// WHY: A failed switch must not look like a switch to the default icon
#[test]
fn given_failures_when_setting_blocking_then_none_not_default() {
    // Given: A host that rejects blue, and one without support
    let bridge = red_gray_bridge();
    let unsupported = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["red"])).with_support(false),
    );

    // When: Both requests fail
    let rejected = bridge.set_icon_blocking("blue");
    let refused = unsupported.set_icon_blocking("red");

    // Then: Failure sentinel, never DEFAULT
    assert_eq!(rejected, None);
    assert_eq!(refused, None);
    assert_eq!(unsupported.platform().setter_invocations(), 0);
}

/// WHAT: An empty name goes to the host and is rejected there
/// WHY: Only DEFAULT clears the alternate icon; other names are not reinterpreted
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_empty_name_when_setting_icon_then_platform_rejected() {
    // Given: The bridge showing red
    let bridge = red_gray_bridge();
    bridge.set_icon("red").await.unwrap();

    // When: Requesting an empty name
    let result = bridge.set_icon("").await;

    // Then: The host rejects it and red stays active
    assert!(matches!(
        result.map_err(|e| e.kind()),
        Err(IconErrorKind::PlatformRejected)
    ));
    assert_eq!(bridge.current_icon(), "red");
    assert_eq!(bridge.platform().setter_invocations(), 2);
}

/// WHAT: Blocking adapter works from inside an async runtime
/// WHY: Legacy callers must get a value or the failure sentinel, never a panic
#[tokio::test]
async fn given_runtime_context_when_setting_blocking_then_value_returned() {
    // Given: A bridge used from a current-thread runtime task
    let bridge = red_gray_bridge();
    let deferred = IconBridge::new(
        SimulatedPlatform::new(IconManifest::from_names(["gray"]))
            .with_delivery(CompletionDelivery::Deferred(Duration::from_millis(10))),
    );

    // When: Switching with the blocking adapter
    let red = bridge.set_icon_blocking("red");
    let blue = bridge.set_icon_blocking("blue");
    let gray = deferred.set_icon_blocking("gray");

    // Then: Results come back directly
    assert_eq!(red, Some(IconName::from("red")));
    assert_eq!(blue, None);
    assert_eq!(gray, Some(IconName::from("gray")));
}

/// WHAT: A completion released unanswered is MechanismUnavailable
/// WHY: A host that loses the request must not leave callers guessing
#[tokio::test]
async fn given_host_drops_completion_when_setting_icon_then_mechanism_unavailable() {
    // Given: A host that drops every completion
    let bridge = IconBridge::new(DroppingPlatform);

    // When: Requesting red
    let result = bridge.set_icon("red").await;

    // Then: MechanismUnavailable
    assert!(matches!(
        result.map_err(|e| e.kind()),
        Err(IconErrorKind::MechanismUnavailable)
    ));
}

/// WHAT: Blocking adapter maps a dropped completion to the failure sentinel
/// WHY: Same outcome through both entry points
#[test]
fn given_host_drops_completion_when_setting_blocking_then_none() {
    // Given: A host that drops every completion
    let bridge = IconBridge::new(DroppingPlatform);

    // When/Then: The failure sentinel
    assert_eq!(bridge.set_icon_blocking("red"), None);
}
