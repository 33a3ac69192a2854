//! WASM application implementation
//!
//! Mounts the board onto the page: a DOM-backed surface, a gloo timer, and
//! the event handlers for the signup form and the remove buttons.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

use super::App;
use crate::client::WasmClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::interface::{ActivitySurface, HttpClient, Timer};
use crate::notice::Notice;
use crate::render::{escape_html, CatalogView, RemoveBinding, SELECT_PLACEHOLDER};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

type RemoveHandler = Rc<dyn Fn(RemoveBinding)>;

/// The page elements the board writes to.
pub struct DomSurface {
    document: Document,
    list: Element,
    select: HtmlSelectElement,
    email: HtmlInputElement,
    form: HtmlFormElement,
    message: HtmlElement,
    on_remove: RefCell<Option<RemoveHandler>>,
    // Click handlers for the buttons currently in the list.
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

fn dom_error(e: JsValue) -> Error {
    ErrorKind::Dom(format!("{e:?}")).into()
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ErrorKind::Dom(format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| ErrorKind::Dom(format!("#{id} has an unexpected element type")).into())
}

impl DomSurface {
    pub fn attach(document: &Document) -> Result<Self> {
        Ok(Self {
            document: document.clone(),
            list: by_id(document, "activities-list")?,
            select: by_id(document, "activity")?,
            email: by_id(document, "email")?,
            form: by_id(document, "signup-form")?,
            message: by_id(document, "message")?,
            on_remove: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Handler invoked with the captured target when a remove button is clicked.
    pub fn set_remove_handler(&self, handler: impl Fn(RemoveBinding) + 'static) {
        *self.on_remove.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    /// Current `(activity, email)` in the signup form.
    pub fn form_values(&self) -> (String, String) {
        (self.select.value(), self.email.value())
    }

    fn try_render(&self, view: &CatalogView) -> core::result::Result<(), JsValue> {
        self.list.set_inner_html("");
        self.listeners.borrow_mut().clear();
        self.select.set_inner_html(&format!(
            r#"<option value="">{}</option>"#,
            escape_html(SELECT_PLACEHOLDER)
        ));

        let handler = self.on_remove.borrow().clone();
        let mut listeners = self.listeners.borrow_mut();

        for card in &view.cards {
            let element = self.document.create_element("div")?;
            element.set_class_name("activity-card");
            element.set_inner_html(&card.html);
            self.list.append_child(&element)?;

            let buttons = element.query_selector_all(".delete-btn")?;
            for (index, binding) in card.removals().into_iter().enumerate() {
                let Some(button) = buttons.get(index as u32) else {
                    break;
                };
                let handler = handler.clone();
                let listener = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    if let Some(handler) = &handler {
                        handler(binding.clone());
                    }
                });
                button
                    .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
                listeners.push(listener);
            }

            let option = HtmlOptionElement::new_with_text_and_value(&card.activity, &card.activity)?;
            self.select.append_child(&option)?;
        }

        Ok(())
    }
}

impl ActivitySurface for DomSurface {
    fn render_catalog(&self, view: &CatalogView) {
        if let Err(e) = self.try_render(view) {
            log::error!("Error rendering activities: {e:?}");
        }
    }

    fn render_load_failure(&self, message: &str) {
        self.list
            .set_inner_html(&format!("<p>{}</p>", escape_html(message)));
    }

    fn show_notice(&self, notice: &Notice) {
        self.message.set_text_content(Some(&notice.text));
        self.message.set_class_name(notice.kind.class());
    }

    fn hide_notice(&self) {
        if let Err(e) = self.message.class_list().add_1("hidden") {
            log::error!("Error hiding notice: {e:?}");
        }
    }

    fn reset_form(&self) {
        self.form.reset();
    }
}

pub type BrowserApp = App<WasmClient, DomSurface, GlooTimer>;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() -> core::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let origin = window.location().origin()?;
    let config = ClientConfig::new(&origin).map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Activity board starting against {}", config.base_url);

    spawn_local(async move {
        if let Err(e) = mount(document, config).await {
            log::error!("Failed to mount activity board: {e}");
        }
    });

    Ok(())
}

async fn mount(document: Document, config: ClientConfig) -> Result<()> {
    let client = WasmClient::new(&config).await?;
    let surface = DomSurface::attach(&document)?;
    let app: Rc<BrowserApp> = Rc::new(App::new(client, surface, GlooTimer, config));

    // Weak: the surface lives inside the app.
    let weak = Rc::downgrade(&app);
    app.surface().set_remove_handler(move |binding: RemoveBinding| {
        if let Some(app) = weak.upgrade() {
            spawn_local(async move {
                app.unregister(&binding.activity, &binding.identity).await;
            });
        }
    });

    // The submit listener keeps the app alive for the page's lifetime.
    let submit_app = Rc::clone(&app);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let app = Rc::clone(&submit_app);
        let (activity, email) = app.surface().form_values();
        spawn_local(async move {
            app.signup(&activity, &email).await;
        });
    });
    app.surface()
        .form()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_submit.forget();

    app.load_and_render().await;
    Ok(())
}
