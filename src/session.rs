//! Browser session and page handles.
//!
//! With the `browser` feature the session drives a real Chromium over the
//! DevTools protocol; actions evaluate the locator's JavaScript query in
//! the page. Without the feature the same synchronous API is backed by a
//! scriptable in-memory page model, so the suite's own tests run without a
//! browser installed.
//!
//! The API is blocking in both builds. Tests run sequentially and each
//! owns its session, so there is nothing to gain from exposing the async
//! client directly; the real implementation owns a tokio runtime and
//! blocks on each call.

use crate::config::Config;

/// Launch-time browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Artificial delay before each page action, in milliseconds
    pub slow_mo_ms: u64,
    /// Path to a chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            slow_mo_ms: 0,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Derive browser settings from the resolved suite configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            headless: config.headless,
            slow_mo_ms: config.slow_mo_ms,
            ..Self::default()
        }
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the per-action delay
    #[must_use]
    pub const fn with_slow_mo(mut self, slow_mo_ms: u64) -> Self {
        self.slow_mo_ms = slow_mo_ms;
        self
    }

    /// Set an explicit chromium binary
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// =============================================================================
// Real CDP implementation (`browser` feature)
// =============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::locator::Locator;
    use crate::result::{E2eError, E2eResult};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Runtime;
    use tracing::{debug, info};

    /// A live browser session
    #[derive(Debug)]
    pub struct Session {
        config: BrowserConfig,
        runtime: Arc<Runtime>,
        browser: Arc<tokio::sync::Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handler: tokio::task::JoinHandle<()>,
    }

    impl Session {
        /// Launch a browser
        pub fn launch(config: BrowserConfig) -> E2eResult<Self> {
            let runtime = Arc::new(
                tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()?,
            );

            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);
            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }
            let cdp_config = builder.build().map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler_stream) = runtime
                .block_on(CdpBrowser::launch(cdp_config))
                .map_err(|e| E2eError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            let handler = runtime.spawn(async move {
                while let Some(event) = handler_stream.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            info!(headless = config.headless, "browser launched");
            Ok(Self {
                config,
                runtime,
                browser: Arc::new(tokio::sync::Mutex::new(browser)),
                handler,
            })
        }

        /// Open a fresh page
        pub fn new_page(&self) -> E2eResult<Page> {
            let page = self.runtime.block_on(async {
                let browser = self.browser.lock().await;
                browser.new_page("about:blank").await
            });
            let page = page.map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;
            Ok(Page {
                runtime: Arc::clone(&self.runtime),
                inner: Arc::new(tokio::sync::Mutex::new(page)),
                slow_mo_ms: self.config.slow_mo_ms,
            })
        }

        /// Launch settings for this session
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub fn close(self) -> E2eResult<()> {
            self.runtime.block_on(async {
                let mut browser = self.browser.lock().await;
                browser.close().await
            })
            .map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    /// Handle to one browser tab
    #[derive(Debug, Clone)]
    pub struct Page {
        runtime: Arc<Runtime>,
        inner: Arc<tokio::sync::Mutex<CdpPage>>,
        slow_mo_ms: u64,
    }

    impl Page {
        fn pace(&self) {
            if self.slow_mo_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.slow_mo_ms));
            }
        }

        fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> E2eResult<T> {
            self.runtime.block_on(async {
                let page = self.inner.lock().await;
                let value = page.evaluate(expr).await.map_err(|e| E2eError::Element {
                    message: e.to_string(),
                })?;
                value.into_value().map_err(|e| E2eError::Element {
                    message: e.to_string(),
                })
            })
        }

        /// Navigate to a URL
        pub fn goto(&self, url: &str) -> E2eResult<()> {
            self.pace();
            debug!(url, "goto");
            self.runtime.block_on(async {
                let page = self.inner.lock().await;
                page.goto(url).await.map_err(|e| E2eError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                page.wait_for_navigation()
                    .await
                    .map_err(|e| E2eError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(())
            })
        }

        /// Current page URL
        pub fn current_url(&self) -> E2eResult<String> {
            self.eval("window.location.href")
        }

        /// Document title
        pub fn title(&self) -> E2eResult<String> {
            self.eval("document.title")
        }

        /// Fill an input, firing input/change events
        pub fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
            self.pace();
            debug!(%locator, "fill");
            let expr = format!(
                "(() => {{ const el = {q}; if (!el) return false; el.focus(); \
                 el.value = {value:?}; \
                 el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return true; }})()",
                q = locator.to_query(),
            );
            let found: bool = self.eval(&expr)?;
            if found {
                Ok(())
            } else {
                Err(E2eError::Element {
                    message: format!("fill target not found: {locator}"),
                })
            }
        }

        /// Click an element
        pub fn click(&self, locator: &Locator) -> E2eResult<()> {
            self.pace();
            debug!(%locator, "click");
            let expr = format!(
                "(() => {{ const el = {q}; if (!el) return false; el.click(); return true; }})()",
                q = locator.to_query(),
            );
            let found: bool = self.eval(&expr)?;
            if found {
                Ok(())
            } else {
                Err(E2eError::Element {
                    message: format!("click target not found: {locator}"),
                })
            }
        }

        /// Attach files to a file input
        pub fn set_files(&self, locator: &Locator, files: &[&Path]) -> E2eResult<()> {
            use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;

            self.pace();
            let css = match locator.selector() {
                crate::locator::Selector::Css(s) => s.clone(),
                crate::locator::Selector::InputName(n) => format!("input[name=\"{n}\"]"),
                other => {
                    return Err(E2eError::Element {
                        message: format!("file upload needs a CSS locator, got {other}"),
                    })
                }
            };
            let paths: Vec<String> = files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();

            self.runtime.block_on(async {
                let page = self.inner.lock().await;
                let element = page.find_element(&css).await.map_err(|e| E2eError::Element {
                    message: e.to_string(),
                })?;
                let params = SetFileInputFilesParams::builder()
                    .files(paths)
                    .backend_node_id(element.backend_node_id())
                    .build()
                    .map_err(|e| E2eError::Element { message: e })?;
                page.execute(params).await.map_err(|e| E2eError::Element {
                    message: e.to_string(),
                })?;
                Ok(())
            })
        }

        /// Text content of the element
        pub fn text_content(&self, locator: &Locator) -> E2eResult<String> {
            let expr = format!(
                "(() => {{ const el = {q}; return el ? (el.textContent || '').trim() : null; }})()",
                q = locator.to_query(),
            );
            let text: Option<String> = self.eval(&expr)?;
            text.ok_or_else(|| E2eError::Element {
                message: format!("element not found: {locator}"),
            })
        }

        /// Current value of an input
        pub fn input_value(&self, locator: &Locator) -> E2eResult<String> {
            let expr = format!(
                "(() => {{ const el = {q}; return el ? (el.value || '') : null; }})()",
                q = locator.to_query(),
            );
            let value: Option<String> = self.eval(&expr)?;
            value.ok_or_else(|| E2eError::Element {
                message: format!("element not found: {locator}"),
            })
        }

        /// Whether the element exists and is rendered
        pub fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
            let expr = format!(
                "(() => {{ const el = {q}; return !!(el && el.offsetParent !== null); }})()",
                q = locator.to_query(),
            );
            self.eval(&expr)
        }

        /// Whether the element is enabled
        pub fn is_enabled(&self, locator: &Locator) -> E2eResult<bool> {
            let expr = format!(
                "(() => {{ const el = {q}; return el ? !el.disabled : null; }})()",
                q = locator.to_query(),
            );
            let enabled: Option<bool> = self.eval(&expr)?;
            enabled.ok_or_else(|| E2eError::Element {
                message: format!("element not found: {locator}"),
            })
        }

        /// Number of elements the locator matches
        pub fn count(&self, locator: &Locator) -> E2eResult<usize> {
            self.eval(&locator.to_count_query())
        }

        /// Attribute value, if present
        pub fn attribute(&self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
            let expr = format!(
                "(() => {{ const el = {q}; return el ? el.getAttribute({name:?}) : null; }})()",
                q = locator.to_query(),
            );
            self.eval(&expr)
        }

        /// Number of resources the page has loaded; sampled by network-idle waits
        pub fn resource_count(&self) -> E2eResult<u64> {
            self.eval("performance.getEntriesByType('resource').length")
        }

        /// PNG screenshot of the page
        pub fn screenshot(&self) -> E2eResult<Vec<u8>> {
            use base64::Engine;

            let data = self.runtime.block_on(async {
                let page = self.inner.lock().await;
                let params = CaptureScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build();
                page.execute(params).await.map_err(|e| E2eError::Screenshot {
                    message: e.to_string(),
                })
            })?;

            base64::engine::general_purpose::STANDARD
                .decode(&data.data)
                .map_err(|e| E2eError::Screenshot {
                    message: e.to_string(),
                })
        }
    }
}

// =============================================================================
// In-memory mock implementation (no `browser` feature)
// =============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::BrowserConfig;
    use crate::locator::Locator;
    use crate::result::{E2eError, E2eResult};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;
    use tracing::debug;

    /// Modelled state of one element in the mock page
    #[derive(Debug, Clone)]
    pub struct ElementState {
        /// Rendered and visible
        pub visible: bool,
        /// Accepts interaction
        pub enabled: bool,
        /// Text content
        pub text: String,
        /// Input value
        pub value: String,
        /// How many elements the locator matches
        pub count: usize,
        /// Attribute map
        pub attributes: HashMap<String, String>,
    }

    impl Default for ElementState {
        fn default() -> Self {
            Self {
                visible: true,
                enabled: true,
                text: String::new(),
                value: String::new(),
                count: 1,
                attributes: HashMap::new(),
            }
        }
    }

    impl ElementState {
        /// A visible, enabled element
        #[must_use]
        pub fn visible() -> Self {
            Self::default()
        }

        /// A present but hidden element
        #[must_use]
        pub fn hidden() -> Self {
            Self {
                visible: false,
                ..Self::default()
            }
        }

        /// Set text content
        #[must_use]
        pub fn with_text(mut self, text: impl Into<String>) -> Self {
            self.text = text.into();
            self
        }

        /// Set input value
        #[must_use]
        pub fn with_value(mut self, value: impl Into<String>) -> Self {
            self.value = value.into();
            self
        }

        /// Set match count
        #[must_use]
        pub const fn with_count(mut self, count: usize) -> Self {
            self.count = count;
            self
        }

        /// Set an attribute
        #[must_use]
        pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.attributes.insert(name.into(), value.into());
            self
        }

        /// Mark the element disabled
        #[must_use]
        pub fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }
    }

    /// Recorded page interaction, for test scripting
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PageAction {
        /// Navigation
        Goto(String),
        /// Input fill
        Fill {
            /// Target locator key
            locator: String,
            /// Filled value
            value: String,
        },
        /// Click
        Click {
            /// Target locator key
            locator: String,
        },
        /// File attachment
        SetFiles {
            /// Target locator key
            locator: String,
            /// Attached paths
            files: Vec<PathBuf>,
        },
    }

    #[derive(Debug, Default)]
    struct PageModel {
        url: String,
        title: String,
        elements: HashMap<String, ElementState>,
        actions: Vec<PageAction>,
        resource_count: u64,
    }

    impl PageModel {
        // locator key first, then the bare selector key, so tests can seed
        // either the exact nth element or the whole group
        fn find(&self, locator: &Locator) -> Option<&ElementState> {
            self.elements
                .get(&locator.key())
                .or_else(|| self.elements.get(&locator.selector().key()))
        }
    }

    /// A mock browser session
    #[derive(Debug)]
    pub struct Session {
        config: BrowserConfig,
    }

    impl Session {
        /// "Launch" the mock browser
        pub fn launch(config: BrowserConfig) -> E2eResult<Self> {
            Ok(Self { config })
        }

        /// Open a fresh mock page
        pub fn new_page(&self) -> E2eResult<Page> {
            Ok(Page {
                model: Arc::new(Mutex::new(PageModel::default())),
                slow_mo_ms: self.config.slow_mo_ms,
            })
        }

        /// Launch settings for this session
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the session
        pub fn close(self) -> E2eResult<()> {
            Ok(())
        }
    }

    /// Handle to the in-memory page model.
    ///
    /// Clones share state, so a test can hand a clone to a scripting
    /// thread that mutates the model while the main thread waits on it.
    #[derive(Debug, Clone)]
    pub struct Page {
        model: Arc<Mutex<PageModel>>,
        slow_mo_ms: u64,
    }

    impl Page {
        /// A standalone mock page, for unit tests below the harness
        #[must_use]
        pub fn new_mock() -> Self {
            Self {
                model: Arc::new(Mutex::new(PageModel::default())),
                slow_mo_ms: 0,
            }
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, PageModel> {
            self.model.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn pace(&self) {
            if self.slow_mo_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.slow_mo_ms));
            }
        }

        fn interactable(&self, locator: &Locator) -> E2eResult<()> {
            let model = self.lock();
            let state = model.find(locator).ok_or_else(|| E2eError::Element {
                message: format!("element not found: {locator}"),
            })?;
            if !state.visible {
                return Err(E2eError::Element {
                    message: format!("element not visible: {locator}"),
                });
            }
            if !state.enabled {
                return Err(E2eError::Element {
                    message: format!("element disabled: {locator}"),
                });
            }
            Ok(())
        }

        /// Navigate to a URL
        pub fn goto(&self, url: &str) -> E2eResult<()> {
            self.pace();
            debug!(url, "goto");
            let mut model = self.lock();
            model.url = url.to_string();
            model.actions.push(PageAction::Goto(url.to_string()));
            Ok(())
        }

        /// Current page URL
        pub fn current_url(&self) -> E2eResult<String> {
            Ok(self.lock().url.clone())
        }

        /// Document title
        pub fn title(&self) -> E2eResult<String> {
            Ok(self.lock().title.clone())
        }

        /// Fill an input
        pub fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
            self.pace();
            self.interactable(locator)?;
            debug!(%locator, "fill");
            let mut model = self.lock();
            let key = locator.key();
            if let Some(state) = model.elements.get_mut(&key) {
                state.value = value.to_string();
            } else if let Some(state) = model.elements.get_mut(&locator.selector().key()) {
                state.value = value.to_string();
            }
            model.actions.push(PageAction::Fill {
                locator: key,
                value: value.to_string(),
            });
            Ok(())
        }

        /// Click an element
        pub fn click(&self, locator: &Locator) -> E2eResult<()> {
            self.pace();
            self.interactable(locator)?;
            debug!(%locator, "click");
            let mut model = self.lock();
            model.actions.push(PageAction::Click {
                locator: locator.key(),
            });
            Ok(())
        }

        /// Attach files to a file input
        pub fn set_files(&self, locator: &Locator, files: &[&Path]) -> E2eResult<()> {
            self.pace();
            self.interactable(locator)?;
            let mut model = self.lock();
            model.actions.push(PageAction::SetFiles {
                locator: locator.key(),
                files: files.iter().map(|p| p.to_path_buf()).collect(),
            });
            Ok(())
        }

        /// Text content of the element
        pub fn text_content(&self, locator: &Locator) -> E2eResult<String> {
            let model = self.lock();
            model
                .find(locator)
                .map(|state| state.text.clone())
                .ok_or_else(|| E2eError::Element {
                    message: format!("element not found: {locator}"),
                })
        }

        /// Current value of an input
        pub fn input_value(&self, locator: &Locator) -> E2eResult<String> {
            let model = self.lock();
            model
                .find(locator)
                .map(|state| state.value.clone())
                .ok_or_else(|| E2eError::Element {
                    message: format!("element not found: {locator}"),
                })
        }

        /// Whether the element exists and is visible
        pub fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.lock().find(locator).is_some_and(|s| s.visible))
        }

        /// Whether the element is enabled
        pub fn is_enabled(&self, locator: &Locator) -> E2eResult<bool> {
            let model = self.lock();
            model
                .find(locator)
                .map(|state| state.enabled)
                .ok_or_else(|| E2eError::Element {
                    message: format!("element not found: {locator}"),
                })
        }

        /// Number of elements the locator matches
        pub fn count(&self, locator: &Locator) -> E2eResult<usize> {
            Ok(self.lock().find(locator).map_or(0, |s| s.count))
        }

        /// Attribute value, if present
        pub fn attribute(&self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
            Ok(self
                .lock()
                .find(locator)
                .and_then(|state| state.attributes.get(name).cloned()))
        }

        /// Number of resources loaded
        pub fn resource_count(&self) -> E2eResult<u64> {
            Ok(self.lock().resource_count)
        }

        /// Screenshot (empty in the mock)
        pub fn screenshot(&self) -> E2eResult<Vec<u8>> {
            Ok(Vec::new())
        }

        // --- scripting hooks, used by tests to model the application ---

        /// Set the page URL directly
        pub fn set_url(&self, url: impl Into<String>) {
            self.lock().url = url.into();
        }

        /// Set the document title directly
        pub fn set_title(&self, title: impl Into<String>) {
            self.lock().title = title.into();
        }

        /// Insert or replace an element
        pub fn upsert_element(&self, locator: &Locator, state: ElementState) {
            self.lock().elements.insert(locator.key(), state);
        }

        /// Remove an element
        pub fn remove_element(&self, locator: &Locator) {
            self.lock().elements.remove(&locator.key());
        }

        /// Record one more loaded resource
        pub fn bump_resource_count(&self) {
            self.lock().resource_count += 1;
        }

        /// Snapshot of every interaction so far
        #[must_use]
        pub fn actions(&self) -> Vec<PageAction> {
            self.lock().actions.clone()
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Page, Session};

#[cfg(not(feature = "browser"))]
pub use mock::{ElementState, Page, PageAction, Session};
