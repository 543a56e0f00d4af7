use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::domain::{BundleEntry, ProjectSpec, PrototypeBundle};

pub const SPEC_FILE: &str = "spec.json";
pub const ENTRY_FILE: &str = "index.html";
const DEFAULT_ROOT: &str = "prototype";
const FILE_MODE: u32 = 0o644;

const INDEX_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TITLE__</title>
  <style>
    :root { --primary: #10b981; --neutral: #18181b; }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: system-ui, sans-serif; background: var(--neutral); color: #f4f4f5; }
    main { max-width: 960px; margin: 0 auto; padding: 48px 24px; }
    h1 { font-size: 2.5rem; margin: 0 0 16px; }
    p.lead { font-size: 1.125rem; color: #d4d4d8; }
    a.cta { display: inline-block; margin: 24px 0; padding: 12px 24px; border-radius: 8px; background: var(--primary); color: #fff; text-decoration: none; font-weight: 600; }
    ul.features { list-style: none; padding: 0; display: grid; gap: 12px; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); }
    ul.features li { border: 1px solid #3f3f46; border-radius: 8px; padding: 16px; }
    nav.sections a { color: #a1a1aa; margin-right: 16px; }
  </style>
</head>
<body>
  <main>
    <nav class="sections" id="sections"></nav>
    <section id="hero">
      <h1 id="title"></h1>
      <p class="lead" id="description"></p>
      <a class="cta" id="cta" href="#"></a>
    </section>
    <section id="features">
      <h2>Features</h2>
      <ul class="features" id="feature-list"></ul>
    </section>
    <div id="section-bodies"></div>
  </main>
  <script>
    fetch("spec.json")
      .then(function (res) { return res.json(); })
      .then(function (spec) {
        var root = document.documentElement.style;
        if (spec.branding) {
          root.setProperty("--primary", spec.branding.primary);
          root.setProperty("--neutral", spec.branding.neutral);
        }
        document.getElementById("title").textContent = spec.title;
        document.getElementById("description").textContent = spec.description;
        var cta = document.getElementById("cta");
        cta.textContent = spec.cta.label;
        cta.setAttribute("href", spec.cta.href);
        var list = document.getElementById("feature-list");
        (spec.features || []).forEach(function (feature) {
          var item = document.createElement("li");
          item.textContent = feature;
          list.appendChild(item);
        });
        var nav = document.getElementById("sections");
        (spec.sections || []).forEach(function (section) {
          var link = document.createElement("a");
          link.textContent = section.title;
          link.setAttribute("href", "#" + section.id);
          nav.appendChild(link);
        });
        var bodies = document.getElementById("section-bodies");
        (spec.sections || []).forEach(function (section) {
          var entries = (section.steps || []).concat(section.tiers || []);
          if (!entries.length) { return; }
          var block = document.createElement("section");
          block.id = section.id;
          var heading = document.createElement("h2");
          heading.textContent = section.title;
          block.appendChild(heading);
          var list = document.createElement("ol");
          entries.forEach(function (entry) {
            var item = document.createElement("li");
            item.textContent = entry;
            list.appendChild(item);
          });
          block.appendChild(list);
          bodies.appendChild(block);
        });
        var hero = (spec.sections || []).filter(function (s) { return s.id === "hero"; })[0];
        if (hero && hero.subtext) {
          document.getElementById("description").textContent = spec.description + " " + hero.subtext;
        }
      });
  </script>
</body>
</html>
"##;

#[derive(Debug, thiserror::Error)]
pub enum PackagingError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("archive failed: {0}")]
    Archive(#[from] io::Error),
}

/// Renders a [`ProjectSpec`] into a gzip'd tar of static files.
///
/// Archive headers carry fixed metadata so identical specs give identical
/// bytes.
pub struct PrototypePackager {
    root: String,
}

impl Default for PrototypePackager {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl PrototypePackager {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn package(&self, spec: &ProjectSpec) -> Result<PrototypeBundle, PackagingError> {
        let entries = vec![
            BundleEntry {
                path: format!("{}/{}", self.root, SPEC_FILE),
                contents: spec.to_json_pretty()?.into_bytes(),
            },
            BundleEntry {
                path: format!("{}/{}", self.root, ENTRY_FILE),
                contents: render_index(spec).into_bytes(),
            },
        ];

        let archive = write_archive(&entries)?;

        tracing::debug!(
            entries = entries.len(),
            bytes = archive.len(),
            "Prototype bundle packaged"
        );

        Ok(PrototypeBundle::new(entries, archive))
    }
}

fn render_index(spec: &ProjectSpec) -> String {
    INDEX_TEMPLATE.replace("__TITLE__", &html_escape::encode_text(&spec.title))
}

fn write_archive(entries: &[BundleEntry]) -> Result<Vec<u8>, io::Error> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(entry.contents.len() as u64);
        header.set_mode(FILE_MODE);
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, &entry.path, entry.contents.as_slice())?;
    }

    let mut encoder = builder.into_inner()?;
    encoder.flush()?;
    encoder.finish()
}
