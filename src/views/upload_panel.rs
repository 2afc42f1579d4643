// ============================================================================
// UPLOAD PANEL - Drop zone, preview, progress and upload button
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, FileList, HtmlElement, HtmlInputElement};

use crate::dom::{get_element_by_id, on_click, on_drag, on_event, ElementBuilder};
use crate::models::{CsvPreview, FileMeta, UploadFile};
use crate::viewmodels::DashboardViewModel;

const FILE_INPUT_ID: &str = "csv-file-input";
const PROGRESS_BAR_ID: &str = "upload-progress-bar";

pub fn render_upload_panel(vm: &DashboardViewModel, sample_csv_path: &str, max_bytes: u64) -> Result<Element, JsValue> {
    let intake = vm.intake.snapshot();
    let in_flight = vm.uploads.is_in_flight();

    let panel = ElementBuilder::new("div")?.class("upload-panel").build();
    let zone = render_drop_zone(vm, max_bytes)?;
    panel.append_child(&zone)?;

    if let Some(error) = &intake.error {
        let message = ElementBuilder::new("p")?.class("upload-error").text(error).build();
        panel.append_child(&message)?;
    }

    if let (Some(file), false) = (&intake.file, in_flight) {
        let selected = ElementBuilder::new("p")?
            .class("upload-selected")
            .text(&format!("Selected file: {}", file.name))
            .build();
        let remove = ElementBuilder::new("button")?
            .class("upload-remove")
            .text("Remove")
            .build();
        {
            let vm = vm.clone();
            on_click(&remove, move |_| vm.remove_selection())?;
        }
        selected.append_child(&remove)?;
        panel.append_child(&selected)?;
    }

    if !intake.preview.is_empty() {
        let preview = render_preview(&intake.preview)?;
        panel.append_child(&preview)?;
    }

    if in_flight {
        let progress = vm.uploads.progress();
        let bar = ElementBuilder::new("div")?
            .id(PROGRESS_BAR_ID)?
            .class("progress-bar")
            .attr("style", &format!("width: {}%", progress))?
            .build();
        let status = ElementBuilder::new("div")?
            .class("upload-progress")
            .child(ElementBuilder::new("p")?.text("Uploading...").build())?
            .child(ElementBuilder::new("div")?.class("progress-track").child(bar)?.build())?
            .build();
        panel.append_child(&status)?;
    }

    let sample = ElementBuilder::new("a")?
        .attr("href", sample_csv_path)?
        .attr("download", "")?
        .class("sample-link")
        .text("Download Sample CSV")
        .build();

    let button = ElementBuilder::new("button")?
        .class("upload-button")
        .text(if in_flight { "Uploading..." } else { "Upload" })
        .flag("disabled", intake.file.is_none() || in_flight)?
        .build();
    {
        let vm = vm.clone();
        on_click(&button, move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.submit_upload().await });
        })?;
    }

    let footer = ElementBuilder::new("div")?
        .class("upload-footer")
        .child(sample)?
        .child(button)?
        .build();
    panel.append_child(&footer)?;

    Ok(panel)
}

fn render_drop_zone(vm: &DashboardViewModel, max_bytes: u64) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(FILE_INPUT_ID)?
        .attr("type", "file")?
        .attr("accept", ".csv,text/csv")?
        .attr("hidden", "")?
        .build();
    {
        let vm = vm.clone();
        on_event(&input, "change", move |event| {
            let files = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files());
            if let Some(files) = files {
                select_files(vm.clone(), files);
            }
        })?;
    }

    let zone = ElementBuilder::new("div")?
        .class("drop-zone")
        .child(
            ElementBuilder::new("p")?
                .class("drop-zone-title")
                .text("Drag & drop a CSV file here, or click to select one")
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("drop-zone-hint")
                .text(&format!("Max file size: {}MB", max_bytes / (1024 * 1024)))
                .build(),
        )?
        .child(input)?
        .build();

    on_click(&zone, |event| {
        let from_input = event
            .target()
            .map(|target| target.has_type::<HtmlInputElement>())
            .unwrap_or(false);
        if from_input {
            return;
        }
        if let Some(input) = get_element_by_id(FILE_INPUT_ID).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
            input.click();
        }
    })?;

    {
        let zone_el = zone.clone();
        on_drag(&zone, "dragover", move |event| {
            event.prevent_default();
            let _ = zone_el.class_list().add_1("drag-active");
        })?;
    }
    {
        let zone_el = zone.clone();
        on_drag(&zone, "dragleave", move |_| {
            let _ = zone_el.class_list().remove_1("drag-active");
        })?;
    }
    {
        let vm = vm.clone();
        on_drag(&zone, "drop", move |event| {
            event.prevent_default();
            if let Some(files) = event.data_transfer().and_then(|dt| dt.files()) {
                select_files(vm.clone(), files);
            }
        })?;
    }

    Ok(zone)
}

/// Moves the bar of the upload in flight without re-rendering the page.
pub fn update_progress_bar(percent: u8) {
    if let Some(bar) = get_element_by_id(PROGRESS_BAR_ID) {
        let _ = bar.set_attribute("style", &format!("width: {}%", percent));
    }
}

fn select_files(vm: DashboardViewModel, list: FileList) {
    if vm.screen_files(&file_metas(&list)).is_err() {
        return;
    }
    spawn_local(async move {
        match read_file_list(&list).await {
            Ok(files) => {
                // Rejections are shown inline from the intake state.
                let _ = vm.select_files(files);
            }
            Err(e) => log::error!("❌ [UPLOAD] Could not read the selected file: {:?}", e),
        }
    });
}

fn file_metas(list: &FileList) -> Vec<FileMeta> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|file| FileMeta::new(file.name(), file.type_(), file.size() as u64))
        .collect()
}

/// Reads every file of a picker or drop into memory. Only called once the
/// selection passed screening.
pub async fn read_file_list(list: &FileList) -> Result<Vec<UploadFile>, JsValue> {
    let mut files = Vec::new();
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        let buffer = JsFuture::from(file.array_buffer()).await?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        files.push(UploadFile::new(file.name(), file.type_(), bytes));
    }
    Ok(files)
}

fn render_preview(preview: &CsvPreview) -> Result<Element, JsValue> {
    let mut header_cells = Vec::new();
    for column in preview.columns() {
        header_cells.push(ElementBuilder::new("th")?.text(&column).build());
    }

    let mut rows = Vec::new();
    for row in &preview.rows {
        let mut cells = Vec::new();
        for value in row.values() {
            cells.push(ElementBuilder::new("td")?.text(value).build());
        }
        rows.push(ElementBuilder::new("tr")?.children(cells)?.build());
    }

    let table = ElementBuilder::new("table")?
        .class("csv-preview-table")
        .child(
            ElementBuilder::new("thead")?
                .child(ElementBuilder::new("tr")?.children(header_cells)?.build())?
                .build(),
        )?
        .child(ElementBuilder::new("tbody")?.children(rows)?.build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("csv-preview")
        .child(
            ElementBuilder::new("h3")?
                .text(&format!("CSV Preview (first {} rows):", preview.len()))
                .build(),
        )?
        .child(table)?
        .build())
}
