#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use web_file_export::{BrowserHost, ExportRequest, FileExporter, Host};

wasm_bindgen_test_configure!(run_in_browser);

fn download_anchors(host: &BrowserHost) -> u32 {
    host.document()
        .query_selector_all("a[download]")
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn current_browser_has_no_native_save() {
    let host = BrowserHost::current().unwrap();
    assert!(!host.supports_native_save());
}

#[wasm_bindgen_test]
fn blob_carries_bytes_and_type() {
    let host = BrowserHost::current().unwrap();
    let blob = host.create_blob(b"a,b\n1,2\n", "text/csv").unwrap();

    assert_eq!(9.0, blob.size());
    assert_eq!("text/csv", blob.type_());
}

#[wasm_bindgen_test]
fn anchor_is_configured_and_detached() {
    let host = BrowserHost::current().unwrap();
    let anchor = host.create_anchor().unwrap();
    host.set_anchor_target(&anchor, "blob:null/test", "report.csv")
        .unwrap();
    host.hide_anchor(&anchor).unwrap();

    assert_eq!("report.csv", anchor.download());
    assert!(anchor.hidden());
    assert!(anchor.parent_node().is_none());

    host.attach_anchor(&anchor).unwrap();
    assert!(anchor.parent_node().is_some());
    host.detach_anchor(&anchor).unwrap();
    assert!(anchor.parent_node().is_none());
}

#[wasm_bindgen_test]
fn export_leaves_no_anchor_behind() {
    let exporter = FileExporter::new(BrowserHost::current().unwrap());
    let before = download_anchors(exporter.host());

    exporter
        .try_export(&ExportRequest::new("report.csv", "a,b\n1,2\n", "text/csv"))
        .unwrap();

    assert_eq!(before, download_anchors(exporter.host()));
}

#[wasm_bindgen_test]
fn object_url_round_trip() {
    let host = BrowserHost::current().unwrap();
    let blob = host.create_blob(&[0, 1, 2], "application/octet-stream").unwrap();
    let url = host.create_object_url(&blob).unwrap();

    assert!(url.starts_with("blob:"));
    host.revoke_object_url(&url).unwrap();
}

#[wasm_bindgen_test]
fn export_text_entry_point() {
    let before = download_anchors(&BrowserHost::current().unwrap());
    assert!(web_file_export::export_text("notes.txt", "hello", "text/plain").is_ok());
    assert_eq!(before, download_anchors(&BrowserHost::current().unwrap()));
}
