use crate::{
    CompletionDelivery, IconChangeCompletion, IconErrorKind, IconManifest, IconPlatform,
    IconSetter, SimulatedPlatform,
};

use std::time::Duration;

fn red_gray() -> SimulatedPlatform {
    SimulatedPlatform::new(IconManifest::from_names(["red", "gray"]))
}

/// WHAT: Registered name becomes the active alternate
/// WHY: The host applies valid switches and reports success
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_registered_name_when_setting_then_host_state_updated() {
    // Given: A host with red and gray registered
    let platform = red_gray();
    let setter = platform.resolve_icon_setter().unwrap();
    let (completion, pending) = IconChangeCompletion::channel();

    // When: Switching to red
    setter.set_alternate_icon_name(Some("red"), completion);

    // Then: Success reported and red is active
    assert_eq!(pending.await.unwrap(), Ok(()));
    assert_eq!(platform.alternate_icon_name().as_deref(), Some("red"));
    assert_eq!(platform.setter_invocations(), 1);
}

/// WHAT: Unregistered name is rejected and state unchanged
/// WHY: The packaged configuration is the source of truth
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unregistered_name_when_setting_then_error_reported() {
    // Given: A host showing gray
    let platform = red_gray();
    platform.set_external_icon(Some("gray"));
    let setter = platform.resolve_icon_setter().unwrap();
    let (completion, pending) = IconChangeCompletion::channel();

    // When: Switching to blue
    setter.set_alternate_icon_name(Some("blue"), completion);

    // Then: Error reported and gray still active
    let message = pending.await.unwrap().unwrap_err();
    assert!(message.contains("blue"));
    assert_eq!(platform.alternate_icon_name().as_deref(), Some("gray"));
}

/// WHAT: Missing switch procedure fails the probe
/// WHY: Removed private APIs must be a reportable failure
#[test]
fn given_mechanism_missing_when_resolving_then_mechanism_unavailable() {
    // Given: A host without the switch procedure
    let platform = red_gray().with_mechanism(false);

    // When: Probing for it
    let result = platform.resolve_icon_setter();

    // Then: MechanismUnavailable
    assert!(matches!(
        result.map_err(|e| e.kind()),
        Err(IconErrorKind::MechanismUnavailable)
    ));
}

/// WHAT: Deferred delivery answers from another thread later
/// WHY: Mirrors UIKit answering after the request call returned
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_deferred_delivery_when_setting_then_answer_arrives_later() {
    // Given: A host answering after 20ms
    let platform = red_gray().with_delivery(CompletionDelivery::Deferred(Duration::from_millis(20)));
    let setter = platform.resolve_icon_setter().unwrap();
    let (completion, pending) = IconChangeCompletion::channel();

    // When: Switching to gray
    setter.set_alternate_icon_name(Some("gray"), completion);

    // Then: The answer arrives and gray becomes active
    assert_eq!(pending.await.unwrap(), Ok(()));
    assert_eq!(platform.alternate_icon_name().as_deref(), Some("gray"));
}

/// WHAT: Unreadable configuration is reported as such
/// WHY: The bridge degrades on this specific error
#[test]
fn given_unreadable_configuration_when_listing_then_configuration_unreadable() {
    // Given: A host whose packaged list cannot be read
    let platform = red_gray().with_unreadable_configuration("Info.plist damaged");

    // When: Reading the packaged names
    let result = platform.packaged_alternate_icons();

    // Then: ConfigurationUnreadable
    assert!(matches!(
        result.map_err(|e| e.kind()),
        Err(IconErrorKind::ConfigurationUnreadable)
    ));
}
