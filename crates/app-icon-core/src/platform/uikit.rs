//! UIKit icon host for iOS.
//!
//! Talks to `UIApplication.sharedApplication` through the Objective-C
//! runtime. The switch procedure is looked up by selector at call time
//! because the silent variant is not part of UIKit's public headers and may
//! disappear in any iOS release.

use crate::{
    CoreResult, IconError,
    platform::{IconChangeCompletion, IconPlatform, IconSetter},
};

use std::{ffi::CStr, mem, ptr};

use block2::{Block, RcBlock};
use objc2::{
    MainThreadMarker, msg_send,
    rc::Retained,
    runtime::{AnyClass, AnyObject, Imp, Sel},
};
use objc2_foundation::{NSBundle, NSError, NSString};
use tracing::{debug, instrument, warn};

/// Switches without the system "You have changed the icon" alert.
const SILENT_SETTER: &CStr = c"_setAlternateIconName:completionHandler:";

/// Public UIKit API, shows the system alert.
const PUBLIC_SETTER: &CStr = c"setAlternateIconName:completionHandler:";

const BUNDLE_ICONS_KEY: &str = "CFBundleIcons";
const ALTERNATE_ICONS_KEY: &str = "CFBundleAlternateIcons";

type SetAlternateIconNameFn = unsafe extern "C-unwind" fn(
    *mut AnyObject,
    Sel,
    *mut NSString,
    &Block<dyn Fn(*mut NSError)>,
);

/// Icon host backed by the running `UIApplication`.
///
/// Every UIKit call must happen on the main thread. Off the main thread the
/// queries answer "unsupported" and the probe fails.
#[derive(Debug, Clone, Copy)]
pub struct UIKitPlatform {
    suppress_alert: bool,
}

impl Default for UIKitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl UIKitPlatform {
    /// Host using the silent switch procedure.
    pub fn new() -> Self {
        Self {
            suppress_alert: true,
        }
    }

    /// Use the public switch procedure, which shows the system alert.
    pub fn with_system_alert(mut self) -> Self {
        self.suppress_alert = false;
        self
    }

    fn setter_selector(&self) -> &'static CStr {
        if self.suppress_alert {
            SILENT_SETTER
        } else {
            PUBLIC_SETTER
        }
    }

    fn shared_application() -> Option<Retained<AnyObject>> {
        let _mtm = MainThreadMarker::new()?;
        let class = AnyClass::get(c"UIApplication")?;
        // SAFETY: `sharedApplication` is a class method returning the
        // singleton, and we are on the main thread.
        unsafe { msg_send![class, sharedApplication] }
    }
}

impl IconPlatform for UIKitPlatform {
    type Setter = UIKitIconSetter;

    fn supports_alternate_icons(&self) -> bool {
        let Some(app) = Self::shared_application() else {
            debug!("UIApplication unavailable, reporting no alternate icon support");
            return false;
        };

        let responds: bool =
            unsafe { msg_send![&*app, respondsToSelector: objc2::sel!(supportsAlternateIcons)] };
        if !responds {
            return false;
        }

        // SAFETY: property exists since iOS 10.3, checked above.
        unsafe { msg_send![&*app, supportsAlternateIcons] }
    }

    fn alternate_icon_name(&self) -> Option<String> {
        let app = Self::shared_application()?;
        // SAFETY: `alternateIconName` is a nullable NSString property.
        let name: Option<Retained<NSString>> = unsafe { msg_send![&*app, alternateIconName] };
        name.map(|name| name.to_string())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn packaged_alternate_icons(&self) -> CoreResult<Vec<String>> {
        let bundle = NSBundle::mainBundle();

        let icons_key = NSString::from_str(BUNDLE_ICONS_KEY);
        // SAFETY: `objectForInfoDictionaryKey:` returns a nullable object.
        let icons: Option<Retained<AnyObject>> =
            unsafe { msg_send![&*bundle, objectForInfoDictionaryKey: &*icons_key] };
        let icons = icons
            .filter(|icons| is_dictionary(icons))
            .ok_or_else(|| {
                IconError::configuration_unreadable(format!(
                    "{} missing from Info.plist",
                    BUNDLE_ICONS_KEY
                ))
            })?;

        let alternates_key = NSString::from_str(ALTERNATE_ICONS_KEY);
        // SAFETY: `icons` is an NSDictionary, checked above.
        let alternates: Option<Retained<AnyObject>> =
            unsafe { msg_send![&*icons, objectForKey: &*alternates_key] };

        let Some(alternates) = alternates.filter(|alternates| is_dictionary(alternates)) else {
            debug!("No alternate icons declared");
            return Ok(Vec::new());
        };

        // SAFETY: `alternates` is an NSDictionary; `allKeys` returns an
        // NSArray whose elements are the Info.plist keys, which are strings.
        let names = unsafe {
            let keys: Retained<AnyObject> = msg_send![&*alternates, allKeys];
            let count: usize = msg_send![&*keys, count];
            (0..count)
                .map(|index| {
                    let key: Retained<NSString> = msg_send![&*keys, objectAtIndex: index];
                    key.to_string()
                })
                .collect::<Vec<_>>()
        };

        debug!(icon_count = names.len(), "Alternate icons read from Info.plist");

        Ok(names)
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn resolve_icon_setter(&self) -> CoreResult<Self::Setter> {
        let app = Self::shared_application().ok_or_else(|| {
            IconError::mechanism_unavailable("UIApplication must be used from the main thread")
        })?;

        let selector_name = self.setter_selector();
        let sel = Sel::register(selector_name);

        let responds: bool = unsafe { msg_send![&*app, respondsToSelector: sel] };
        if !responds {
            warn!(selector = ?selector_name, "UIApplication does not respond to icon setter");
            return Err(IconError::mechanism_unavailable(format!(
                "Method not found: {}",
                selector_name.to_string_lossy()
            )));
        }

        let imp = app
            .class()
            .instance_method(sel)
            .map(|method| method.implementation())
            .ok_or_else(|| {
                IconError::mechanism_unavailable(format!(
                    "Implementation not found: {}",
                    selector_name.to_string_lossy()
                ))
            })?;

        Ok(UIKitIconSetter { app, sel, imp })
    }
}

/// Icon switch procedure resolved on the running `UIApplication`.
#[derive(Debug)]
pub struct UIKitIconSetter {
    app: Retained<AnyObject>,
    sel: Sel,
    imp: Imp,
}

impl IconSetter for UIKitIconSetter {
    fn set_alternate_icon_name(&self, name: Option<&str>, completion: IconChangeCompletion) {
        let ns_name = name.map(NSString::from_str);
        let name_ptr = ns_name
            .as_deref()
            .map_or(ptr::null_mut(), |name| ptr::from_ref(name).cast_mut());

        let handler = RcBlock::new(move |error: *mut NSError| {
            // SAFETY: UIKit passes nil or a valid NSError.
            let message = unsafe { error.as_ref() }
                .map(|error| error.localizedDescription().to_string());
            completion.complete(message);
        });

        // SAFETY: both setter selectors take (NSString *_Nullable,
        // void (^)(NSError *_Nullable)) and return void; the implementation
        // was resolved for exactly this selector on this receiver's class.
        unsafe {
            let method = mem::transmute::<Imp, SetAlternateIconNameFn>(self.imp);
            method(
                Retained::as_ptr(&self.app).cast_mut(),
                self.sel,
                name_ptr,
                &handler,
            );
        }
    }
}

fn is_dictionary(object: &AnyObject) -> bool {
    let Some(class) = AnyClass::get(c"NSDictionary") else {
        return false;
    };
    // SAFETY: `isKindOfClass:` is defined on every NSObject.
    unsafe { msg_send![object, isKindOfClass: class] }
}
