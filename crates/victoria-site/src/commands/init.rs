//! Create a config file and starter documentation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing Victoria site...");

    scaffold(config_path, Path::new("docs"), Path::new("public"), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'victoria-site dev' to start the development server.");

    Ok(())
}

/// Create whichever starter files are missing, or all of them with `overwrite`.
fn scaffold(config_path: &Path, docs_dir: &Path, public_dir: &Path, overwrite: bool) -> Result<()> {
    if docs_dir.exists() {
        if !overwrite {
            tracing::warn!(
                "{} already exists; keeping existing files. Use --yes to overwrite.",
                docs_dir.display()
            );
        }
    } else {
        fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;
    }

    write_starter(config_path, DEFAULT_CONFIG, overwrite)?;
    write_starter(&docs_dir.join("LANGUAGE.md"), DEFAULT_LANGUAGE, overwrite)?;
    write_starter(&docs_dir.join("PHILOSOPHY.md"), DEFAULT_PHILOSOPHY, overwrite)?;

    let downloads = public_dir.join("downloads");
    if !downloads.exists() {
        fs::create_dir_all(&downloads)
            .with_context(|| format!("Failed to create {}", downloads.display()))?;
        tracing::info!("Created {}", downloads.display());
    }

    Ok(())
}

/// Write a starter file unless it exists and `overwrite` is off.
fn write_starter(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Victoria website configuration

[site]
title = "Victoria"
tagline = "A learning-first language."
repository = "https://github.com/theawakener0/VictoriaLang"
version = "0.1.0"

# Base URL (for deployment)
base_url = "/"

[docs]
# Markdown sources
dir = "docs"

# Output directory for the built site
output = "dist"

# Copied verbatim into the output; put release binaries in public/downloads
public = "public"

[build]
minify = true
"#;

const DEFAULT_LANGUAGE: &str = r#"---
title: The Victoria Language
description: A tour of Victoria's syntax and core features.
---

## Hello, world

Every Victoria program is a sequence of statements. Save this as `hello.vc`:

```go
define greet(name: string) -> string {
    return "Hello, ${name}!"
}

print(greet("Victoria"))
```

Run it with:

```bash
victoria hello.vc
```

## Variables

Bind values with `let`. Types are optional:

```go
let count: int = 42
let name = "Victoria"
```

## Types

| Type | Example | Notes |
| --- | --- | --- |
| `int` | `42` | 64-bit integer |
| `float` | `3.14` | Double precision |
| `string` | `"hi"` | Supports `${}` interpolation |
| `bool` | `true` | |

## Control flow

```go
if count > 40 {
    print("The answer is ready.")
}
```

> Victoria prefers one obvious way to do things.
"#;

const DEFAULT_PHILOSOPHY: &str = r#"---
title: Philosophy
description: Why Victoria looks the way it does.
---

## Learning first

Victoria is designed for people learning to program and for the people who
teach them.

- **Readable by default**: code should read like plain instructions.
- **Progressive complexity**: start simple, add types and structure as you grow.
- **Helpful errors**: the interpreter explains what went wrong and where.

## Batteries included

A single executable with no installers and no dependency setup.
"#;
