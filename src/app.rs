const APP_VERSION: &str = env!("APP_VERSION");

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gemini;
use crate::preview;
use crate::split::Split;
use crate::state::{Screen, Session};
use crate::upload::{Probe, Upload};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, File, MouseEvent, Url};
use yew::format::Text;
use yew::services::fetch::{FetchService, FetchTask, Response};
use yew::services::reader::{FileData, ReaderTask};
use yew::services::ReaderService;
use yew::{html, html::ChangeData, Component, ComponentLink, Html, NodeRef, ShouldRender};

pub struct Model {
    link: ComponentLink<Self>,
    config: Config,
    reader: ReaderService,
    fetch: FetchService,
    reader_task: Option<ReaderTask>,
    fetch_task: Option<FetchTask>,
    pending_mime_type: Option<String>,
    started_at: Option<f64>,
    session: Session,
    probe: Option<Probe>,
    split: Split,
    dragging: bool,
    container: NodeRef,
}

pub enum Msg {
    FileSelection(Vec<File>),
    FileLoaded(FileData),
    Generated(Result<String>),
    CopyCode,
    Reset,
    DragStart,
    Drag(i32),
    DragEnd,
}

impl Model {
    /// Kick off the request. Only fails before anything is sent.
    fn generate(&mut self, upload: &Upload) -> Result<()> {
        let request = gemini::request(&self.config, upload)?;

        let callback = self.link.callback(|response: Response<Text>| {
            let (meta, body) = response.into_parts();
            let status = meta.status.as_u16();

            let result = body
                .map_err(|e| Error::Network(e.to_string()))
                .and_then(|text| gemini::parse_response(status, &text));

            Msg::Generated(result)
        });

        console::log_2(&"sending design to".into(), &self.config.model.clone().into());
        self.started_at = now();

        let task = self
            .fetch
            .fetch(request, callback)
            .map_err(|e| Error::Network(e.to_string()))?;

        self.fetch_task = Some(task);

        Ok(())
    }

    fn view_header(&self) -> Html {
        html! {
            <header class="bg-gradient-to-r from-blue-600 to-purple-600 p-6 shadow-lg">
                <h1 class="text-3xl font-bold text-white">{ "✨ Image to Code Generator" }</h1>
                <p class="text-blue-100 text-sm mt-1">
                    { "Powered by Google Gemini AI" }
                    <span class="ml-2 text-blue-200 text-xs">{ format!("version {}", APP_VERSION) }</span>
                </p>
            </header>
        }
    }

    fn view_upload(&self) -> Html {
        let on_file = self.link.callback(move |v: ChangeData| {
            let mut res = vec![];

            if let ChangeData::Files(files) = v {
                if let Some(file) = files.get(0) {
                    res.push(file);
                }
            }

            Msg::FileSelection(res)
        });

        html! {
            <div class="h-full flex items-center justify-center p-8">
                <div class="max-w-2xl w-full">
                    <label class="cursor-pointer block">
                        <div class="border-4 border-dashed border-gray-600 rounded-2xl p-16 hover:border-blue-500 hover:bg-gray-800 transition-all duration-300">
                            { self.view_drop_zone() }
                        </div>
                        <input
                            type="file"
                            accept="image/*"
                            class="hidden"
                            disabled=self.session.loading
                            onchange=on_file />
                    </label>

                    {
                        match &self.session.error {
                            Some(error) => html! {
                                <div class="mt-4 p-4 bg-red-900 border border-red-700 rounded-lg">
                                    <p class="text-red-200">{ error }</p>
                                </div>
                            },
                            None => html! {},
                        }
                    }

                    <div class="mt-8 text-center">
                        <p class="text-gray-400 text-sm">
                            { "💡 " }
                            <strong>{ "Tip:" }</strong>
                            { " Works best with clear UI designs, hand-drawn sketches, or Figma screenshots" }
                        </p>
                    </div>
                </div>
            </div>
        }
    }

    fn view_drop_zone(&self) -> Html {
        match &self.session.image {
            Some(image_url) => html! {
                <div class="text-center">
                    <img src=image_url alt="Uploaded" class="max-w-full max-h-96 mx-auto rounded-lg shadow-xl" />
                    {
                        match &self.probe {
                            Some(probe) => html! {
                                <p class="mt-2 text-gray-500 text-xs">{ probe.to_string() }</p>
                            },
                            None => html! {},
                        }
                    }
                    {
                        if self.session.loading {
                            html! {
                                <div class="mt-6">
                                    <div class="animate-spin rounded-full h-12 w-12 border-b-2 border-blue-500 mx-auto"></div>
                                    <p class="mt-4 text-blue-400 font-medium">{ "Analyzing your design..." }</p>
                                    <p class="text-gray-400 text-sm mt-2">{ "This may take 10-20 seconds" }</p>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            },
            None => html! {
                <div class="text-center">
                    <svg class="w-24 h-24 mx-auto text-gray-500 mb-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path
                            stroke-linecap="round"
                            stroke-linejoin="round"
                            stroke-width="2"
                            d="M7 16a4 4 0 01-.88-7.903A5 5 0 1115.9 6L16 6a5 5 0 011 9.9M15 13l-3-3m0 0l-3 3m3-3v12" />
                    </svg>
                    <p class="text-2xl text-white mb-3 font-semibold">{ "Drop your UI design here" }</p>
                    <p class="text-gray-400 mb-2">{ "or click to browse files" }</p>
                    <p class="text-gray-500 text-sm">{ "Supports: Sketches, Wireframes, Screenshots, Mockups" }</p>
                </div>
            },
        }
    }

    fn view_result(&self) -> Html {
        let (left, right) = self.split.sizes();

        // the iframe would swallow mousemove while the gutter is dragged
        let preview_style = if self.dragging {
            "pointer-events: none;"
        } else {
            ""
        };

        html! {
            <div
                class="flex h-full"
                ref=self.container.clone()
                onmousemove=self.link.callback(|e: MouseEvent| Msg::Drag(e.client_x()))
                onmouseup=self.link.callback(|_| Msg::DragEnd)
                onmouseleave=self.link.callback(|_| Msg::DragEnd)>

                <div class="bg-gray-800 h-full flex flex-col overflow-hidden" style=self.split.pane_style(left)>
                    <div class="p-4 bg-gray-900 border-b border-gray-700 flex justify-between items-center">
                        <h3 class="text-white font-semibold flex items-center gap-2">{ "📝 Generated Code" }</h3>
                        <button
                            onclick=self.link.callback(|_| Msg::CopyCode)
                            class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors text-sm font-medium flex items-center gap-2">
                            { "Copy Code" }
                        </button>
                    </div>
                    <pre class="flex-1 overflow-auto p-6 text-sm font-mono">
                        <code class="text-green-400 whitespace-pre-wrap">{ self.session.generated_code.clone() }</code>
                    </pre>
                </div>

                <div
                    class="bg-gray-700 hover:bg-blue-500"
                    style=self.split.gutter_style()
                    onmousedown=self.link.callback(|_| Msg::DragStart)>
                </div>

                <div class="bg-white h-full flex flex-col overflow-hidden" style=self.split.pane_style(right)>
                    <div class="p-4 bg-gray-900 border-b border-gray-700">
                        <h3 class="text-white font-semibold flex items-center gap-2">{ "👁️ Live Preview" }</h3>
                    </div>
                    <div class="flex-1 overflow-auto bg-gray-50">
                        <iframe
                            srcdoc=preview::document(&self.session.generated_code)
                            class="w-full h-full border-0"
                            style=preview_style
                            title="Preview"
                            sandbox=preview::SANDBOX>
                        </iframe>
                    </div>
                </div>
            </div>
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_: Self::Properties, link: ComponentLink<Self>) -> Self {
        let config = Config::from_build_env();

        if config.api_key().is_err() {
            console::error_1(&"GEMINI_API_KEY was not set at build time, generation will fail".into());
        }

        Model {
            link,
            config,
            reader: ReaderService::new(),
            fetch: FetchService::new(),
            reader_task: None,
            fetch_task: None,
            pending_mime_type: None,
            started_at: None,
            session: Session::default(),
            probe: None,
            split: Split::default(),
            dragging: false,
            container: NodeRef::default(),
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::FileSelection(files) => {
                let file = match files.into_iter().next() {
                    Some(file) => file,
                    None => return false,
                };

                let mime_type = file.type_();
                let previous = self.session.image.clone();

                let selected = self
                    .session
                    .select(&mime_type, || match object_url(&file) {
                        Ok(url) => url,
                        Err(e) => {
                            console::error_2(&"could not create object url:".into(), &e);
                            String::new()
                        }
                    });

                if let Err(e) = selected {
                    console::log_2(&"ignoring selection:".into(), &e.to_string().into());
                    return true;
                }

                if let Some(url) = previous {
                    revoke_object_url(&url);
                }
                self.probe = None;
                self.pending_mime_type = Some(mime_type);

                let callback = self.link.callback(Msg::FileLoaded);
                let task = self
                    .reader
                    .read_file(file, callback)
                    .map_err(|e| Error::Read(e.to_string()));

                match task {
                    Ok(task) => self.reader_task = Some(task),
                    Err(e) => return self.update(Msg::Generated(Err(e))),
                }

                true
            }

            Msg::FileLoaded(file) => {
                self.reader_task = None;

                console::log_2(&"finished loading image:".into(), &file.name.clone().into());

                let mime_type = self.pending_mime_type.take().unwrap_or_default();
                let upload = Upload::new(file.name, mime_type, file.content);

                let probe = upload.probe();
                console::log_2(&"image:".into(), &probe.to_string().into());
                self.probe = Some(probe);

                if let Err(e) = self.generate(&upload) {
                    return self.update(Msg::Generated(Err(e)));
                }

                true
            }

            Msg::Generated(result) => {
                self.fetch_task = None;

                let result = result.and_then(|text| gemini::markup(&text));

                match &result {
                    Ok(code) => {
                        console::log_2(&"generated characters:".into(), &(code.len() as u32).into());
                        if let (Some(start), Some(end)) = (self.started_at, now()) {
                            console::log_2(&"generation took (ms):".into(), &(end - start).into());
                        }
                    }
                    Err(e) => {
                        console::error_2(&"Error generating code:".into(), &e.to_string().into())
                    }
                }

                self.started_at = None;
                self.session.finish(&result);

                true
            }

            Msg::CopyCode => {
                if let Err(e) = copy_to_clipboard(&self.session.generated_code) {
                    console::error_2(&"could not copy code:".into(), &e);
                }

                false
            }

            Msg::Reset => {
                if let Some(url) = self.session.reset() {
                    revoke_object_url(&url);
                }
                self.probe = None;
                self.split = Split::default();
                self.dragging = false;
                self.reader_task = None;
                self.fetch_task = None;

                true
            }

            Msg::DragStart => {
                self.dragging = true;

                true
            }

            Msg::Drag(client_x) => {
                if !self.dragging {
                    return false;
                }

                match self.container.cast::<Element>() {
                    Some(container) => {
                        let rect = container.get_bounding_client_rect();
                        self.split.resize(rect.width(), client_x as f64 - rect.left());

                        true
                    }
                    None => false,
                }
            }

            Msg::DragEnd => {
                let was_dragging = self.dragging;
                self.dragging = false;

                was_dragging
            }
        }
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        let body = match self.session.screen() {
            Screen::Upload => self.view_upload(),
            Screen::Result => self.view_result(),
        };

        html! {
            <div class="h-screen flex flex-col bg-gray-900">
                { self.view_header() }

                <div class="flex-1 overflow-hidden">
                    { body }
                </div>

                {
                    match self.session.screen() {
                        Screen::Result => html! {
                            <div class="fixed bottom-6 right-6 flex flex-col gap-3">
                                <button
                                    onclick=self.link.callback(|_| Msg::Reset)
                                    class="px-6 py-3 bg-gradient-to-r from-purple-600 to-pink-600 text-white rounded-lg hover:from-purple-700 hover:to-pink-700 shadow-lg font-medium flex items-center gap-2">
                                    { "New Design" }
                                </button>
                            </div>
                        },
                        Screen::Upload => html! {},
                    }
                }
            </div>
        }
    }
}

fn now() -> Option<f64> {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
}

fn object_url(file: &File) -> std::result::Result<String, JsValue> {
    Url::create_object_url_with_blob(file)
}

fn revoke_object_url(url: &str) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = Url::revoke_object_url(url) {
        console::error_2(&"could not revoke object url:".into(), &e);
    }
}

/// `navigator.clipboard` sits behind web_sys_unstable_apis, so go through
/// Reflect instead.
fn copy_to_clipboard(text: &str) -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let clipboard = js_sys::Reflect::get(&window.navigator(), &"clipboard".into())?;
    let write_text: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &"writeText".into())?.dyn_into()?;

    write_text.call1(&clipboard, &text.into())?;
    window.alert_with_message("Code copied to clipboard!")?;

    Ok(())
}
