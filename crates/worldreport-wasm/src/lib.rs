//! worldreport-wasm — WebAssembly bindings for worldreport-core
//!
//! Exposes one stateful [`ReportViewer`] object to JavaScript. The page wires
//! its menu, dropdowns and buttons to the viewer's methods and paints the HTML
//! it returns; every request goes through the browser's `fetch()`.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { ReportViewer } from 'worldreport-wasm';
//!
//! await init();
//! const viewer = new ReportViewer({ base_url: 'http://localhost:8081' });
//!
//! const triggers = viewer.select_report('cities');
//! if (triggers.refresh_scope_names) await viewer.load_scope_names();
//! await viewer.refresh();
//! document.getElementById('table').innerHTML = viewer.render_html();
//! document.getElementById('status').textContent = viewer.status();
//! ```
//!
//! Notes
//! -----
//! - Responses of superseded requests are dropped; awaiting an older
//!   `refresh()` after a newer one resolves to `"Stale"`.
//! - Lookup failures only reach the console; the dropdown keeps its
//!   placeholder.
//! - Everything returned by `render_html()` is already HTML-escaped.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

use worldreport_core::viewer::{PendingFetch, PendingLookup};
use worldreport_core::{
    FetchOutcome, RenderedTable, ReportError, ReportType, Scope, Triggers, Viewer, ViewerConfig,
};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing worldreport WASM module...".into());
}

/* --------------------------------------------------------------------------
   Static registry
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct ReportInfo {
    value: &'static str,
    title: &'static str,
}

/// Menu entries: `[{ value: "countries", title: "Countries" }, ...]`.
#[wasm_bindgen]
pub fn reports() -> Result<JsValue, JsValue> {
    let items: Vec<_> = ReportType::ALL
        .iter()
        .map(|r| ReportInfo {
            value: r.as_str(),
            title: r.title(),
        })
        .collect();
    Ok(to_value(&items)?)
}

/* --------------------------------------------------------------------------
   Viewer
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct ReportViewer {
    inner: Rc<RefCell<Viewer>>,
}

#[wasm_bindgen]
impl ReportViewer {
    /// `config` may be omitted, or a partial `{ base_url, default_page_size, number_style }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReportViewer, JsValue> {
        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        ReportViewer::with_config(config).map_err(to_js_error)
    }

    // -- registry views ------------------------------------------------------

    /// Scope names offered by the active report (`["Global", ...]`).
    pub fn scopes(&self) -> Vec<String> {
        self.inner
            .borrow()
            .state()
            .scopes()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    /// Column headers of the active report under the active scope.
    pub fn columns(&self) -> Vec<String> {
        self.inner
            .borrow()
            .state()
            .columns()
            .iter()
            .map(|c| c.label().to_string())
            .collect()
    }

    // -- mutation contract ---------------------------------------------------

    /// Returns the follow-up work as `{ fetch_report, refresh_scope_names, refresh_districts }`.
    pub fn select_report(&self, name: &str) -> Result<JsValue, JsValue> {
        let triggers = self.choose_report(name).map_err(to_js_error)?;
        Ok(to_value(&triggers)?)
    }

    pub fn set_scope(&self, scope: &str) -> Result<JsValue, JsValue> {
        let scope: Scope = scope.parse().map_err(to_js_error)?;
        let triggers = self.inner.borrow_mut().set_scope(scope);
        Ok(to_value(&triggers)?)
    }

    /// Unknown scope names fall back to Global, like any scope the report
    /// does not offer.
    pub fn apply_filters(
        &self,
        scope: &str,
        name: &str,
        district: &str,
        top_n: &str,
        page_size: &str,
    ) -> Result<JsValue, JsValue> {
        let triggers = self.filter(scope, name, district, top_n, page_size);
        Ok(to_value(&triggers)?)
    }

    pub fn next_page(&self) -> bool {
        self.inner.borrow_mut().next_page()
    }

    pub fn prev_page(&self) -> bool {
        self.inner.borrow_mut().prev_page()
    }

    pub fn jump_to_page(&self, input: &str) -> bool {
        self.inner.borrow_mut().jump_to_page(input)
    }

    // -- network -------------------------------------------------------------

    /// Fetch the active report. Resolves to the outcome
    /// (`{ Applied: { rows } }`, `{ Failed: { kind } }`, `"Stale"` or `"Skipped"`).
    pub fn refresh(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        let pending = inner.borrow_mut().begin_fetch();
        let base = inner.borrow().config().clone();

        future_to_promise(async move {
            let Some(PendingFetch { token, request }) = pending else {
                return Ok(to_value(&FetchOutcome::Skipped)?);
            };
            let response = fetch_text(&base.url_for(&request.path())).await;
            let outcome = inner.borrow_mut().complete_fetch(token, response);
            if let FetchOutcome::Failed { .. } = outcome {
                if let Some(msg) = inner.borrow().last_error() {
                    web_sys::console::error_1(&format!("report fetch failed: {msg}").into());
                }
            }
            Ok(to_value(&outcome)?)
        })
    }

    /// Refresh the scope-name dropdown. Resolves to its options
    /// (`[{ value, label }, ...]`, placeholder first).
    pub fn load_scope_names(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        let pending = inner.borrow_mut().begin_scope_lookup();
        let base = inner.borrow().config().clone();

        future_to_promise(async move {
            if let Some(PendingLookup { token, request }) = pending {
                let response = fetch_text(&base.url_for(&request.path())).await;
                warn_lookup(&request.path(), &response);
                inner.borrow_mut().complete_scope_lookup(token, response);
            }
            let options = to_value(inner.borrow().scope_names().options())?;
            Ok(options)
        })
    }

    /// Refresh the district dropdown for a country code.
    pub fn load_districts(&self, country: String) -> Promise {
        let inner = Rc::clone(&self.inner);
        let pending = inner.borrow_mut().begin_district_lookup(&country);
        let base = inner.borrow().config().clone();

        future_to_promise(async move {
            if let Some(PendingLookup { token, request }) = pending {
                let response = fetch_text(&base.url_for(&request.path())).await;
                warn_lookup(&request.path(), &response);
                inner.borrow_mut().complete_district_lookup(token, response);
            }
            let options = to_value(inner.borrow().districts().options())?;
            Ok(options)
        })
    }

    // -- rendering -----------------------------------------------------------

    pub fn district_visible(&self) -> bool {
        self.inner.borrow().district_visible()
    }

    pub fn render_html(&self) -> String {
        self.rendered().to_html()
    }

    /// The rendered table as a plain object, for front-ends that build their own DOM.
    pub fn table(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(&self.rendered())?)
    }

    pub fn breadcrumbs(&self) -> String {
        self.inner.borrow().breadcrumbs()
    }

    pub fn status(&self) -> String {
        self.inner.borrow().status().to_string()
    }

    pub fn page_info(&self) -> String {
        self.rendered().nav.info
    }

    pub fn prev_enabled(&self) -> bool {
        self.rendered().nav.prev_enabled
    }

    pub fn next_enabled(&self) -> bool {
        self.rendered().nav.next_enabled
    }
}

// Rust-side API behind the bindings.
impl ReportViewer {
    pub fn with_config(config: ViewerConfig) -> worldreport_core::Result<Self> {
        let viewer = Viewer::try_new(config)?;
        Ok(ReportViewer {
            inner: Rc::new(RefCell::new(viewer)),
        })
    }

    pub fn choose_report(&self, name: &str) -> worldreport_core::Result<Triggers> {
        self.inner.borrow_mut().select_report_named(name)
    }

    pub fn filter(
        &self,
        scope: &str,
        name: &str,
        district: &str,
        top_n: &str,
        page_size: &str,
    ) -> Triggers {
        let scope: Scope = scope.parse().unwrap_or_default();
        self.inner
            .borrow_mut()
            .apply_filters(scope, name, district, top_n, page_size)
    }

    pub fn rendered(&self) -> RenderedTable {
        self.inner.borrow().render()
    }
}

/* --------------------------------------------------------------------------
   fetch() transport
-------------------------------------------------------------------------- */

async fn fetch_text(url: &str) -> worldreport_core::Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(network_error)?;

    let window = web_sys::window().ok_or_else(|| ReportError::Network("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;
    if !resp.ok() {
        return Err(ReportError::Http {
            status: resp.status(),
        });
    }

    let text = JsFuture::from(resp.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    text.as_string()
        .ok_or_else(|| ReportError::Network("response body is not text".into()))
}

fn network_error(e: JsValue) -> ReportError {
    let msg = match e.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => e.as_string().unwrap_or_else(|| format!("{e:?}")),
    };
    ReportError::Network(msg)
}

fn warn_lookup(path: &str, response: &worldreport_core::Result<String>) {
    if let Err(e) = response {
        web_sys::console::warn_1(&format!("lookup {path} failed: {e}").into());
    }
}

fn to_js_error(e: ReportError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
