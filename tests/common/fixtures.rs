//! Smali trees on disk for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A disassembly output directory that is removed when dropped.
pub struct SmaliTree {
    dir: TempDir,
}

impl SmaliTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Adds `<class_path>.smali` with one line per entry, e.g.
    /// `with_class("pkg/A$1", &["Lpkg/C;"])`.
    pub fn with_class(self, class_path: &str, lines: &[&str]) -> Self {
        let mut content = format!(".class public L{class_path};\n");
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        self.with_file(&format!("{class_path}.smali"), content.as_bytes())
    }

    pub fn with_file(self, relative: &str, content: &[u8]) -> Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(&path, content).expect("write fixture");
        self
    }

    /// Drops the Instant Run payload that makes the tree unanalyzable.
    pub fn with_instant_run(self) -> Self {
        self.with_file("unknown/instant-run.zip", b"PK")
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical path of a file in the tree, as the analyzer sees it.
    pub fn canonical(&self, relative: &str) -> PathBuf {
        fs::canonicalize(self.dir.path())
            .expect("canonicalize root")
            .join(relative)
    }
}

impl Default for SmaliTree {
    fn default() -> Self {
        Self::new()
    }
}

/// The two-file tree from the anonymous folding scenario: `pkg.A` uses `pkg.B`
/// and its anonymous class `pkg.A$1` uses `pkg.C`.
pub fn anonymous_folding_tree() -> SmaliTree {
    SmaliTree::new()
        .with_class("pkg/A", &["    iget-object v0, p0, Lpkg/A;->b:Lpkg/B;"])
        .with_class(
            "pkg/A$1",
            &[
                ".field final synthetic this$0:Lpkg/A;",
                "    invoke-virtual {v0}, Lpkg/C;->run()V",
            ],
        )
}

/// A small app with inner classes, generated classes and third-party code.
pub fn sample_app() -> SmaliTree {
    SmaliTree::new()
        .with_class(
            "com/example/app/Main",
            &[
                ".super Landroid/app/Activity;",
                "    new-instance v0, Lcom/example/app/Repo;",
                "    invoke-direct {v0}, Lcom/example/app/Repo;-><init>()V",
                "    const-class v1, Lcom/example/app/Repo;",
                "    new-instance v2, Lcom/example/app/Main$Holder;",
                "    sget-object v3, Lcom/example/app/Repo$$Lambda$1;->INSTANCE:Lcom/example/app/Repo$$Lambda$1;",
                "    invoke-static {}, Lcom/example/app/DaggerAppComponent;->create()V",
            ],
        )
        .with_class(
            "com/example/app/Main$Holder",
            &["    iget-object v0, p0, Lcom/example/app/Main$Holder;->repo:Lcom/example/app/Repo;"],
        )
        .with_class(
            "com/example/app/Repo",
            &[".field private items:Ljava/util/List<Lcom/example/app/Item;>;"],
        )
        .with_class("com/example/app/Item", &[])
        .with_class("com/example/app/DaggerAppComponent", &["    new-instance v0, Lcom/example/app/Repo;"])
        .with_class("org/thirdparty/Lib", &["    invoke-static {}, Lcom/example/app/Main;->start()V"])
}
