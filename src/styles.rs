//! Embedded stylesheets for the generated HTML document.
//!
//! Both presets style the same element set (headings, paragraphs, code,
//! tables, lists, links, blockquotes, rules, emphasis) so switching preset
//! never leaves an element unstyled. Callers can append their own rules via
//! [`crate::config::ConversionConfig::custom_css`]; the constants here are
//! always emitted first.

/// Compact print sizing in points. Headings collapse to four sizes (h5/h6
/// share h4).
pub const PRINT_STYLESHEET: &str = r#"
        /* Custom PDF styling */
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            font-size: 9pt;
            line-height: 1.8;
            color: #333;
            max-width: 100%;
        }

        /* Headings */
        h1 {
            font-size: 14pt;
            font-weight: 600;
            margin-top: 20pt;
            margin-bottom: 10pt;
            color: #1a1a1a;
        }

        h2 {
            font-size: 12pt;
            font-weight: 600;
            margin-top: 16pt;
            margin-bottom: 8pt;
            color: #2a2a2a;
        }

        h3 {
            font-size: 10pt;
            font-weight: 600;
            margin-top: 12pt;
            margin-bottom: 6pt;
            color: #3a3a3a;
        }

        h4, h5, h6 {
            font-size: 9pt;
            font-weight: 600;
            margin-top: 10pt;
            margin-bottom: 5pt;
            color: #4a4a4a;
        }

        /* Paragraphs */
        p {
            margin-bottom: 10pt;
        }

        /* Code blocks */
        pre {
            background-color: #f5f5f5;
            border: 1px solid #ddd;
            border-radius: 3px;
            padding: 8pt;
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 7pt;
            line-height: 1.6;
            overflow-x: auto;
        }

        code {
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 7pt;
            background-color: #f5f5f5;
            padding: 2pt 4pt;
            border-radius: 3px;
        }

        pre code {
            padding: 0;
            background-color: transparent;
        }

        /* Tables */
        table {
            border-collapse: collapse;
            width: 100%;
            margin: 10pt 0;
            font-size: 8pt;
        }

        th {
            background-color: #f0f0f0;
            font-weight: 600;
            padding: 8pt;
            text-align: left;
            border: 1px solid #ddd;
        }

        td {
            padding: 6pt 8pt;
            border: 1px solid #ddd;
        }

        /* Lists */
        ul, ol {
            margin: 8pt 0;
            padding-left: 20pt;
        }

        li {
            margin-bottom: 4pt;
        }

        /* Links */
        a {
            color: #0066cc;
            text-decoration: none;
        }

        /* Blockquotes */
        blockquote {
            border-left: 4px solid #ddd;
            margin: 12pt 0;
            padding-left: 12pt;
            color: #666;
            font-style: italic;
        }

        /* Horizontal rules */
        hr {
            border: none;
            border-top: 1px solid #ddd;
            margin: 20pt 0;
        }

        /* Strong/bold */
        strong {
            font-weight: 600;
        }

        /* Emphasis */
        em {
            font-style: italic;
        }
"#;

/// Wider screen sizing in pixels with a centred max-width column.
pub const SCREEN_STYLESHEET: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            font-size: 16px;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 40px 20px;
        }

        /* Headings */
        h1 {
            font-size: 32px;
            font-weight: 600;
            margin-top: 32px;
            margin-bottom: 16px;
            padding-bottom: 8px;
            border-bottom: 1px solid #eaecef;
            color: #1a1a1a;
        }

        h2 {
            font-size: 24px;
            font-weight: 600;
            margin-top: 28px;
            margin-bottom: 14px;
            padding-bottom: 6px;
            border-bottom: 1px solid #eaecef;
            color: #2a2a2a;
        }

        h3 {
            font-size: 20px;
            font-weight: 600;
            margin-top: 24px;
            margin-bottom: 12px;
            color: #3a3a3a;
        }

        h4, h5, h6 {
            font-size: 16px;
            font-weight: 600;
            margin-top: 20px;
            margin-bottom: 10px;
            color: #4a4a4a;
        }

        /* Paragraphs */
        p {
            margin-bottom: 16px;
        }

        /* Code blocks */
        pre {
            background-color: #f6f8fa;
            border: 1px solid #ddd;
            border-radius: 6px;
            padding: 16px;
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 14px;
            line-height: 1.45;
            overflow-x: auto;
        }

        code {
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 14px;
            background-color: #f6f8fa;
            padding: 2px 6px;
            border-radius: 3px;
        }

        pre code {
            padding: 0;
            background-color: transparent;
        }

        /* Tables */
        table {
            border-collapse: collapse;
            width: 100%;
            margin: 16px 0;
            font-size: 15px;
        }

        th {
            background-color: #f0f0f0;
            font-weight: 600;
            padding: 10px 13px;
            text-align: left;
            border: 1px solid #ddd;
        }

        td {
            padding: 8px 13px;
            border: 1px solid #ddd;
        }

        /* Lists */
        ul, ol {
            margin: 12px 0;
            padding-left: 32px;
        }

        li {
            margin-bottom: 6px;
        }

        /* Links */
        a {
            color: #0366d6;
            text-decoration: none;
        }

        /* Blockquotes */
        blockquote {
            border-left: 4px solid #dfe2e5;
            margin: 16px 0;
            padding: 0 16px;
            color: #6a737d;
            font-style: italic;
        }

        /* Horizontal rules */
        hr {
            border: none;
            border-top: 1px solid #ddd;
            margin: 32px 0;
        }

        /* Strong/bold */
        strong {
            font-weight: 600;
        }

        /* Emphasis */
        em {
            font-style: italic;
        }
"#;
