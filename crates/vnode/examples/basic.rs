//! Example: build a node tree, render it and observe clicks

use vnode::dom::{Document, MemoryDocument};
use vnode::{DomObservable, ElementNode, Props};
use tracing_subscriber::EnvFilter;

type Node = ElementNode<MemoryDocument>;

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG=vnode=trace for the full picture)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = MemoryDocument::new();
    let clicks = DomObservable::<MemoryDocument>::new();
    clicks.subscribe(|event| println!("{} on {:?}", event.event_type, event.target));

    let mut button = Node::with_props("button", Props::from([("type", "submit")]));
    let button_id = button.id();
    clicks.bind_event(&mut button, "click");

    let mut form = Node::with_children("form", Props::from([("class", "login")]), vec![button]);
    form.add_child(Node::with_props("input", Props::from([("name", "user")])));

    let live = form.render(&mut doc)?;
    println!("{}", doc.outer_html(live));
    if let Some(submit) = doc.child_at(&live, 0) {
        doc.click(&submit);
    }

    // Edit the tree and render again; the bound listener comes along
    if let Some(button) = form.child_mut(button_id) {
        button.update_props(Props::from([("disabled", "true")]));
    }
    let live = form.render(&mut doc)?;
    println!("{}", doc.outer_html(live));
    if let Some(submit) = doc.child_at(&live, 0) {
        doc.click(&submit);
    }

    Ok(())
}
