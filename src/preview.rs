pub const SANDBOX: &str = "allow-scripts";
pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// The `srcdoc` for the preview iframe. The markup goes in as-is; the
/// sandbox keeps it away from our origin.
pub fn document(markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="{}"></script>
    <style>
      body {{ margin: 0; padding: 20px; }}
    </style>
  </head>
  <body>
    {}
  </body>
</html>
"#,
        TAILWIND_CDN, markup
    )
}
