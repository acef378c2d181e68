//! Fixtures shared by the integration tests: one record per dump, served
//! gzip-compressed by a [`MockTransport`].

#![allow(dead_code)]

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use pouet::{Pouet, Progress};
use pouet_remote::{MockTransport, Transport};
use pouet_storage::MemoryStore;
use serde_json::{Value, json};
use std::io::Write;
use std::sync::{Arc, Mutex};

pub const MANIFEST_URL: &str = "https://data.pouet.invalid/export/json.php";
pub const DATE: &str = "99991231";

pub fn dump_url(kind: &str) -> String {
    format!("https://data.pouet.invalid/export/pouetdatadump-{kind}-{DATE}.json.gz")
}

pub fn manifest(date: &str) -> Value {
    let link = |kind: &str| json!({"filename": format!("pouetdatadump-{kind}-{date}.json.gz"), "url": dump_url(kind)});
    json!({
        "latest": {
            "prods": link("prods"),
            "groups": link("groups"),
            "parties": link("parties"),
            "boards": link("boards"),
        },
        "date": date,
    })
}

fn user(id: u32, nickname: &str, glops: u32) -> Value {
    json!({
        "id": id.to_string(),
        "nickname": nickname,
        "level": "user",
        "avatar": "",
        "glops": glops.to_string(),
        "registerDate": "2000-07-26 22:44:23",
    })
}

pub fn prods() -> Value {
    json!({"data": [{
        "id": "1",
        "name": "Astral Blur",
        "download": "https://files.scene.org/get/demos/groups/tbl/astral.zip",
        "type": "demo",
        "addedUser": user(1, "analogue", 850),
        "addedDate": "2000-07-27 00:00:00",
        "releaseDate": "1997-04-01",
        "voteup": "81",
        "votepig": "18",
        "votedown": "5",
        "voteavg": "0.73",
        "party_compo": "pc demo",
        "party_place": "3",
        "party_year": "1997",
        "party": {"id": "3", "name": "The Party"},
        "invitation": "",
        "invitationyear": "2000",
        "boardID": null,
        "rank": "665",
        "cdc": "2",
        "platforms": {
            "68": {"name": "MS-Dos", "icon": "k_msdos.gif", "slug": "msdos"},
            "69": {"name": "Windows", "icon": "k_win.gif", "slug": "windows"},
        },
        "placings": [{"party": {"id": "3", "name": "The Party"}, "compo": "pc demo", "ranking": "3", "year": "1997"}],
        "groups": [{"id": "2", "name": "TBL"}],
        "credits": [{"user": user(2, "ile", 120), "role": "code"}],
    }]})
}

pub fn groups() -> Value {
    json!({"data": [{
        "id": "2",
        "name": "TBL",
        "acronym": "TBL",
        "disambiguation": "",
        "web": "http://www.tbl.org",
        "addedUser": user(3, "ps", 12),
        "addedDate": "2000-07-27 00:00:00",
    }]})
}

pub fn parties() -> Value {
    json!({"data": [{
        "id": "3",
        "name": "The Party",
        "web": "http://www.theparty.dk",
        "addedUser": user(4, "gargaj", 1000),
        "addedDate": "2000-07-27 00:00:00",
    }]})
}

pub fn boards() -> Value {
    json!({"data": [{
        "id": "4",
        "name": "Warp Zone",
        "sysop": "somebody",
        "phonenumber": "+45 1234",
        "addedUser": user(5, "bbs", 1),
        "addedDate": "2001-01-01 00:00:00",
        "platforms": {
            "90": {"name": "BeOS", "icon": "k_beos.gif", "slug": "beos"},
            "91": {"name": "Linux", "icon": "k_linux.gif", "slug": "linux"},
        },
    }]})
}

pub fn gzip(value: &Value) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&serde_json::to_vec(value).unwrap()).unwrap();
    encoder.finish().unwrap()
}

/// Manifest and four valid dumps.
pub fn transport() -> MockTransport {
    MockTransport::default()
        .with_route(MANIFEST_URL, serde_json::to_vec(&manifest(DATE)).unwrap())
        .with_route(dump_url("prods"), gzip(&prods()))
        .with_route(dump_url("groups"), gzip(&groups()))
        .with_route(dump_url("parties"), gzip(&parties()))
        .with_route(dump_url("boards"), gzip(&boards()))
}

/// Milestone titles, in emission order.
#[derive(Clone, Default)]
pub struct Titles(Arc<Mutex<Vec<String>>>);
impl Titles {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}
impl Progress for Titles {
    fn milestone(&self, title: &str) {
        self.0.lock().unwrap().push(title.to_string());
    }
}

pub fn pouet(transport: &Arc<MockTransport>, store: &Arc<MemoryStore>, titles: &Titles) -> Pouet {
    Pouet::builder()
        .manifest_url(MANIFEST_URL)
        .transport(transport.clone())
        .snapshots(store.clone())
        .progress(titles.clone())
        .build()
        .unwrap()
}

/// Answers like the wrapped [`MockTransport`], except that requests for
/// `stalled` never complete.
pub struct Stalling {
    pub inner: MockTransport,
    pub stalled: String,
}
#[async_trait]
impl Transport for Stalling {
    async fn get(&self, url: &str) -> pouet_remote::error::Result<Vec<u8>> {
        if url == self.stalled {
            std::future::pending::<()>().await;
        }
        self.inner.get(url).await
    }
}
