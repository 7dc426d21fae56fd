use log::error;
use yew::prelude::*;

use std::fmt;
use std::rc::Rc;

use crate::{mime, BrowserHost, FileExporter, Payload};

/// Builds the payload when the button is clicked rather than on every render.
#[derive(Clone)]
pub struct PayloadSource(Rc<dyn Fn() -> Payload>);

impl PayloadSource {
    pub fn new(produce: impl Fn() -> Payload + 'static) -> Self {
        PayloadSource(Rc::new(produce))
    }

    pub fn produce(&self) -> Payload {
        (self.0)()
    }
}

impl PartialEq for PayloadSource {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PayloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PayloadSource")
    }
}

pub struct ExportButton;

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub label: String,
    pub filename: String,
    #[prop_or(mime::TEXT_PLAIN.to_string())]
    pub mime_type: String,
    pub payload: PayloadSource,
    #[prop_or_default]
    pub class: Classes,
}

pub enum Msg {
    Export,
}

impl Component for ExportButton {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        ExportButton
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Export => {
                let props = ctx.props();
                match BrowserHost::current() {
                    Ok(host) => FileExporter::new(host).export_file(
                        &props.filename,
                        props.payload.produce(),
                        &props.mime_type,
                    ),
                    Err(err) => error!("Cannot export {}: {}", props.filename, err),
                }
            }
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::Export);
        html! {
            <button class={classes!("button", props.class.clone())} {onclick}>
                { props.label.clone() }
            </button>
        }
    }
}
