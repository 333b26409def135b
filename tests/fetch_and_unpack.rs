//! End-to-end dataset fetch against a loopback HTTP server.

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

use tempfile::tempdir;
use textml_utils::{Error, fetch_and_unpack};

/// Serve one HTTP response on a loopback port and return its URL.
fn serve_once(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&body);
        }
    });
    format!("http://{}/dataset.zip", addr)
}

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(&mut cursor);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        zip.start_file(*name, options).expect("start entry");
        zip.write_all(data).expect("write entry");
    }
    zip.finish().expect("finish zip");
    cursor.into_inner()
}

fn read_file(path: &Path) -> Vec<u8> {
    let mut bytes = Vec::new();
    File::open(path)
        .expect("open extracted file")
        .read_to_end(&mut bytes)
        .expect("read extracted file");
    bytes
}

#[test]
fn downloads_caches_and_extracts_dataset() {
    let temp = tempdir().expect("tempdir");
    let archive = zip_bytes(&[("a.txt", b"alpha"), ("b/c.txt", b"beta gamma")]);
    let url = serve_once(archive);

    let root = fetch_and_unpack(temp.path(), &url, "My Dataset").expect("fetch");
    assert_eq!(root, temp.path());

    let extracted = temp.path().join("datasets/my_dataset");
    assert_eq!(read_file(&extracted.join("a.txt")), b"alpha");
    assert_eq!(read_file(&extracted.join("b/c.txt")), b"beta gamma");
    assert!(
        temp.path()
            .join("datasets/__archives__/my_dataset.zip")
            .is_file()
    );
}

#[test]
fn refetch_overwrites_cached_archive() {
    let temp = tempdir().expect("tempdir");

    let url = serve_once(zip_bytes(&[("v.txt", b"first")]));
    fetch_and_unpack(temp.path(), &url, "corpus").expect("first fetch");

    let url = serve_once(zip_bytes(&[("v.txt", b"second")]));
    fetch_and_unpack(temp.path(), &url, "corpus").expect("second fetch");

    assert_eq!(read_file(&temp.path().join("datasets/corpus/v.txt")), b"second");
}

#[test]
fn non_zip_body_fails_extraction_but_is_cached() {
    let temp = tempdir().expect("tempdir");
    let body = b"<html>404 not found</html>".to_vec();
    let url = serve_once(body.clone());

    let err = fetch_and_unpack(temp.path(), &url, "broken set").unwrap_err();
    assert!(matches!(err, Error::Extraction { .. }));

    let cached = temp.path().join("datasets/__archives__/broken_set.zip");
    assert_eq!(read_file(&cached), body);
}

#[test]
fn unreachable_server_is_a_transfer_error() {
    let temp = tempdir().expect("tempdir");
    // Bind then drop the listener so the port refuses connections.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let url = format!("http://{}/gone.zip", addr);

    let err = fetch_and_unpack(temp.path(), &url, "unreachable").unwrap_err();
    assert!(matches!(err, Error::Transfer { .. }));
}
