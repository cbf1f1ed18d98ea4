pub const PLAIN_SCRIPT: &str = "const answer = 42;\nconsole.log(answer);\n";

pub const JSON_DOCUMENT: &str = r#"{"name": "source-viewer", "tags": ["a", "b"], "count": 2}"#;

pub const HTML_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Test & "Page"</title>
  <script>document.write('<img src=x onerror=alert(1)>');</script>
</head>
<body><p class='intro'>Hello</p></body>
</html>
"#;

pub const XML_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Feed</title></channel></rss>
"#;

pub const LATIN1_CONTENT_TYPE: &str = "text/plain; charset=iso-8859-1";
