//! DOM rendering module
//!
//! Rebuilds the list container from the current `TodoList` after every
//! store change and wires the item controls back to the store.
//!
//! Item text only ever reaches the page through `set_text_content`, so
//! injected markup stays literal text and is never parsed as elements.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

use crate::model::{TodoItem, TodoList};
use crate::store::TodoStore;

/// Rebuild the whole list container from the given list
pub fn render_list(
    document: &Document,
    list_el: &Element,
    list: &TodoList,
    store: &Rc<RefCell<TodoStore>>,
) {
    list_el.set_inner_html("");
    for item in list.items() {
        match render_item(document, item, store) {
            Ok(li) => {
                let _ = list_el.append_child(&li);
            }
            Err(err) => log::error!("Failed to render todo {}: {err:?}", item.id),
        }
    }
    render_stats(document, list);
}

/// Completion counter, shown when the page provides a #todo-stats element
fn render_stats(document: &Document, list: &TodoList) {
    if let Some(el) = document.get_element_by_id("todo-stats") {
        let text = format!(
            "{} of {} done ({:.0}%)",
            list.completed_count(),
            list.len(),
            list.completion_percentage()
        );
        el.set_text_content(Some(&text));
    }
}

fn item_class(item: &TodoItem) -> &'static str {
    if item.completed {
        "todo-item completed"
    } else {
        "todo-item"
    }
}

/// Build one list row: checkbox, text, delete button
fn render_item(
    document: &Document,
    item: &TodoItem,
    store: &Rc<RefCell<TodoStore>>,
) -> Result<Element, JsValue> {
    let li = document.create_element("li")?;
    li.set_class_name(item_class(item));
    li.set_attribute("data-id", &item.id.to_string())?;

    let checkbox: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    checkbox.set_type("checkbox");
    checkbox.set_class_name("todo-checkbox");
    checkbox.set_checked(item.completed);
    {
        let store = store.clone();
        let id = item.id;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            store.borrow_mut().toggle(id);
        });
        checkbox
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let text = document.create_element("span")?;
    text.set_class_name("todo-text");
    // Literal text, never markup
    text.set_text_content(Some(&item.text));

    let delete = document.create_element("button")?;
    delete.set_class_name("delete-btn");
    delete.set_text_content(Some("Delete"));
    {
        let store = store.clone();
        let id = item.id;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            store.borrow_mut().remove(id);
        });
        delete.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    li.append_child(&checkbox)?;
    li.append_child(&text)?;
    li.append_child(&delete)?;
    Ok(li)
}
