//! HTML pages for the gallery.
//!
//! Each page is a pure function of the record names it shows. Names are
//! escaped for HTML and percent-encoded inside URLs.

use crate::storage::RecordName;

/// Stylesheet served from the assets directory.
const STYLESHEET_PATH: &str = "/assets/style.css";

/// Escape HTML special characters to prevent XSS attacks.
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap page content in the shared document skeleton.
fn layout(title: &str, body: &str) -> String {
    let title = html_escape(title);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{STYLESHEET_PATH}">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/images">Gallery</a>
        <a href="/admin">Admin</a>
    </nav>
    <main>
{body}
    </main>
</body>
</html>
"##
    )
}

fn image_url(name: &RecordName) -> String {
    format!("/images/{}", urlencoding::encode(name.as_str()))
}

fn delete_url(name: &RecordName) -> String {
    format!("/admin/delete/{}", urlencoding::encode(name.as_str()))
}

/// Render the home page.
pub fn render_home() -> String {
    layout(
        "Image Gallery",
        r#"        <h1>Image Gallery</h1>
        <p>Browse the <a href="/images">gallery</a>.</p>"#,
    )
}

/// Render the public gallery page.
pub fn render_images(images: &[RecordName]) -> String {
    let mut body = String::from("        <h1>Gallery</h1>\n");

    if images.is_empty() {
        body.push_str("        <p class=\"empty\">No images yet.</p>");
        return layout("Gallery", &body);
    }

    body.push_str("        <div class=\"grid\">\n");
    for name in images {
        let url = image_url(name);
        let alt = html_escape(name.as_str());
        body.push_str(&format!(
            "            <a class=\"tile\" href=\"{url}\"><img src=\"{url}\" alt=\"{alt}\" loading=\"lazy\"></a>\n"
        ));
    }
    body.push_str("        </div>");

    layout("Gallery", &body)
}

/// Render the admin page: upload form plus a delete action per image.
pub fn render_admin(images: &[RecordName]) -> String {
    let mut body = String::from(
        r#"        <h1>Admin</h1>
        <form class="upload" action="/upload" method="post" enctype="multipart/form-data">
            <input type="file" name="image" accept="image/*" required>
            <button type="submit">Upload</button>
        </form>
"#,
    );

    if images.is_empty() {
        body.push_str("        <p class=\"empty\">No images yet.</p>");
        return layout("Admin", &body);
    }

    body.push_str("        <div class=\"grid\">\n");
    for name in images {
        let url = image_url(name);
        let delete = delete_url(name);
        let label = html_escape(name.as_str());
        body.push_str(&format!(
            r#"            <figure class="tile">
                <a href="{url}"><img src="{url}" alt="{label}" loading="lazy"></a>
                <figcaption>{label}</figcaption>
                <form action="{delete}" method="post">
                    <button type="submit">Delete</button>
                </form>
            </figure>
"#
        ));
    }
    body.push_str("        </div>");

    layout("Admin", &body)
}
