//! Todo list entry point
//!
//! Handles platform-specific initialization and wires the browser UI.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use todo_list::platform::LocalStorageSlot;
    use todo_list::render;
    use todo_list::store::TodoStore;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Todo list starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let slot = LocalStorageSlot::new(TodoStore::STORAGE_KEY);
        let store = Rc::new(RefCell::new(TodoStore::load(Box::new(slot))));

        let list_el = document
            .get_element_by_id("todo-list")
            .expect("no #todo-list element");

        // Re-render after every store mutation
        {
            let document = document.clone();
            let list_el = list_el.clone();
            let store_handle = store.clone();
            store.borrow_mut().set_on_change(move |list| {
                render::render_list(&document, &list_el, list, &store_handle);
            });
        }

        // First paint from the hydrated list
        render::render_list(&document, &list_el, store.borrow().list(), &store);

        setup_form_handler(&document, store.clone());

        log::info!("Todo list running!");
    }

    fn setup_form_handler(document: &Document, store: Rc<RefCell<TodoStore>>) {
        let form = match document.get_element_by_id("todo-form") {
            Some(form) => form,
            None => {
                log::warn!("No #todo-form element, input disabled");
                return;
            }
        };
        let input: HtmlInputElement = match document
            .get_element_by_id("todo-input")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(input) => input,
            None => {
                log::warn!("No #todo-input element, input disabled");
                return;
            }
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let text = input.value();
            // Clear the input only when something was actually added
            if store.borrow_mut().add(&text).is_some() {
                input.set_value("");
            }
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Todo list (native) starting...");
    log::info!("The UI is browser-only - run with `trunk serve` for the web version");

    println!("\nRunning store smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use todo_list::platform::MemorySlot;
    use todo_list::store::TodoStore;

    let slot = MemorySlot::new();
    let mut store = TodoStore::load(Box::new(slot.clone()));
    let id = store.add("Buy milk").expect("item should be added");
    store.toggle(id);

    let reloaded = TodoStore::load(Box::new(slot));
    assert_eq!(reloaded.list().len(), 1);
    assert!(
        reloaded.list().items()[0].completed,
        "completion should survive a reload"
    );
    println!("✓ Store smoke check passed!");
}
