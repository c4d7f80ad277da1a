//! Tests for the in-memory document
//!
//! Element creation, tree building, listener dispatch and configuration.

use std::cell::RefCell;
use std::rc::Rc;

use vnode_dom::{
    Document, DocumentConfig, DomError, ElementId, Listener, MemoryDocument, NativeEvent,
};

type EventLog = Rc<RefCell<Vec<(String, ElementId, ElementId)>>>;

fn recording_listener(log: &EventLog) -> Listener<ElementId> {
    let log = log.clone();
    Listener::new(move |event: &NativeEvent<ElementId>| {
        log.borrow_mut()
            .push((event.event_type.clone(), event.target, event.current_target));
    })
}

#[test]
fn test_tree_structure() {
    let mut doc = MemoryDocument::new();
    let ul = doc.create_element("ul").unwrap();
    let items: Vec<_> = (0..3).map(|_| doc.create_element("li").unwrap()).collect();
    for item in &items {
        doc.append_child(&ul, item).unwrap();
    }

    assert_eq!(doc.child_count(&ul), 3);
    for (i, item) in items.iter().enumerate() {
        assert_eq!(doc.child_at(&ul, i), Some(*item));
        assert_eq!(doc.parent(*item), Some(ul));
    }
    assert_eq!(doc.child_at(&ul, 3), None);
}

#[test]
fn test_append_moves_attached_element() {
    let mut doc = MemoryDocument::new();
    let a = doc.create_element("div").unwrap();
    let b = doc.create_element("div").unwrap();
    let child = doc.create_element("span").unwrap();

    doc.append_child(&a, &child).unwrap();
    doc.append_child(&b, &child).unwrap();

    assert_eq!(doc.child_count(&a), 0);
    assert_eq!(doc.child_count(&b), 1);
    assert_eq!(doc.parent(child), Some(b));
}

#[test]
fn test_unknown_element() {
    let mut doc = MemoryDocument::new();
    let div = doc.create_element("div").unwrap();
    let mut other = MemoryDocument::new();
    let _ = other.create_element("div").unwrap();
    let stranger = other.create_element("div").unwrap();

    assert_eq!(
        doc.set_attribute(&stranger, "id", "x"),
        Err(DomError::UnknownElement(stranger))
    );
    assert!(doc.append_child(&div, &stranger).is_err());
    assert_eq!(doc.tag_name(&stranger), None);
    assert_eq!(doc.dispatch_event(&stranger, "click"), 0);
}

#[test]
fn test_error_messages() {
    let err = DomError::InvalidCharacter("a b".to_string());
    assert_eq!(err.to_string(), "Invalid character in name: \"a b\"");
    assert_eq!(DomError::ArenaFull.to_string(), "Element arena is full");
}

#[test]
fn test_quote_characters_rejected_in_names() {
    let mut doc = MemoryDocument::new();
    assert!(doc.create_element("a\"b").is_err());
    let div = doc.create_element("div").unwrap();
    assert_eq!(
        doc.set_attribute(&div, "it's", "x"),
        Err(DomError::InvalidCharacter("it's".to_string()))
    );
}

#[test]
fn test_element_id_serializes_as_index() {
    let mut doc = MemoryDocument::new();
    let _ = doc.create_element("html").unwrap();
    let body = doc.create_element("body").unwrap();

    let json = serde_json::to_string(&body).unwrap();
    assert_eq!(json, "1");

    let back: ElementId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, body);
    assert_eq!(back.index(), 1);
}

#[test]
fn test_tag_case_configurable() {
    let mut html = MemoryDocument::new();
    let div = html.create_element("DiV").unwrap();
    assert_eq!(html.tag_name(&div), Some("div"));

    let mut xml = MemoryDocument::with_config(DocumentConfig {
        lowercase_tag_names: false,
        ..Default::default()
    });
    let node = xml.create_element("DiV").unwrap();
    assert_eq!(xml.tag_name(&node), Some("DiV"));
}

#[test]
fn test_dispatch_bubbles_to_ancestors() {
    let mut doc = MemoryDocument::new();
    let form = doc.create_element("form").unwrap();
    let button = doc.create_element("button").unwrap();
    doc.append_child(&form, &button).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(&button, "click", recording_listener(&log)).unwrap();
    doc.add_event_listener(&form, "click", recording_listener(&log)).unwrap();

    assert_eq!(doc.click(&button), 2);
    assert_eq!(
        *log.borrow(),
        [
            ("click".to_string(), button, button),
            ("click".to_string(), button, form),
        ]
    );
}

#[test]
fn test_dispatch_without_bubbling() {
    let mut doc = MemoryDocument::with_config(DocumentConfig {
        bubble_events: false,
        ..Default::default()
    });
    let form = doc.create_element("form").unwrap();
    let button = doc.create_element("button").unwrap();
    doc.append_child(&form, &button).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(&form, "click", recording_listener(&log)).unwrap();

    assert_eq!(doc.click(&button), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_duplicate_listeners_without_dedupe() {
    let mut doc = MemoryDocument::with_config(DocumentConfig {
        dedupe_listeners: false,
        ..Default::default()
    });
    let button = doc.create_element("button").unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener = recording_listener(&log);

    doc.add_event_listener(&button, "click", listener.clone()).unwrap();
    doc.add_event_listener(&button, "click", listener.clone()).unwrap();
    assert_eq!(doc.click(&button), 2);

    // Removal takes one registration at a time
    doc.remove_event_listener(&button, "click", &listener);
    assert_eq!(doc.listener_count(button, "click"), 1);
}

#[test]
fn test_remove_unregistered_listener_is_noop() {
    let mut doc = MemoryDocument::new();
    let button = doc.create_element("button").unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let kept = recording_listener(&log);
    let stranger = recording_listener(&log);

    doc.add_event_listener(&button, "click", kept).unwrap();
    doc.remove_event_listener(&button, "click", &stranger);
    doc.remove_event_listener(&button, "keydown", &stranger);

    assert_eq!(doc.listener_count(button, "click"), 1);
}

#[test]
fn test_outer_html_escapes_attributes() {
    let mut doc = MemoryDocument::new();
    let a = doc.create_element("a").unwrap();
    doc.set_attribute(&a, "title", "say \"hi\" & bye").unwrap();

    assert_eq!(
        doc.outer_html(a),
        r#"<a title="say &quot;hi&quot; &amp; bye"></a>"#
    );
}
