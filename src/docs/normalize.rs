//! Best-effort HTML to Markdown normalization.
//!
//! Documentation pages are rewritten through an ordered chain of textual
//! substitutions rather than a parsed DOM. Later rules assume earlier tags
//! are already collapsed, so rule order is significant. Pattern matching is
//! non-recursive: nested tags of the same kind (a list inside a list item)
//! come out lossy. That is an accepted limitation, not a bug.

use regex::Regex;

/// Ordered rewrite rules compiled once at startup.
///
/// Holds every pattern the normalization chain needs so that per-request
/// work is pure substitution.
pub struct HtmlNormalizer {
    /// Non-content chrome removed before conversion: navigation, footers,
    /// scripts, styles, toolbar markers.
    chrome: Vec<Regex>,
    /// Main-content containers, narrowest first: main, article, body.
    containers: Vec<Regex>,
    /// Tag-to-Markdown substitutions applied in order.
    rules: Vec<(Regex, String)>,
    any_tag: Regex,
    excess_newlines: Regex,
    title: Regex,
}

impl HtmlNormalizer {
    pub fn new() -> Self {
        // Hard-coded patterns; compilation cannot fail.
        let re = |pattern: &str| Regex::new(pattern).expect("hard-coded pattern");

        let chrome = vec![
            re(r"(?s)<nav[^>]*>.*?</nav>"),
            re(r"(?s)<footer[^>]*>.*?</footer>"),
            re(r"(?s)<script[^>]*>.*?</script>"),
            re(r"(?s)<style[^>]*>.*?</style>"),
            re(r#"(?s)<\w+[^>]*class="[^"]*js-toolbar-action[^"]*"[^>]*>.*?</\w+>"#),
        ];

        let containers = vec![
            re(r"(?s)<main[^>]*>(.*?)</main>"),
            re(r"(?s)<article[^>]*>(.*?)</article>"),
            re(r"(?s)<body[^>]*>(.*?)</body>"),
        ];

        let mut rules = Vec::new();

        // Headings h6 down to h1. Descending order avoids partial overlap
        // since the patterns are not mutually exclusive.
        for level in (1..=6).rev() {
            rules.push((
                re(&format!(r"(?s)<h{level}[^>]*>(.*?)</h{level}>")),
                format!("{} $1\n\n", "#".repeat(level)),
            ));
        }

        rules.push((re(r"(?s)<p[^>]*>(.*?)</p>"), "$1\n\n".to_string()));
        rules.push((
            re(r#"(?s)<a[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#),
            "[$2]($1)".to_string(),
        ));

        // List containers unwrap to their content; items become dash lines.
        rules.push((re(r"(?s)<ul[^>]*>(.*?)</ul>"), "$1\n".to_string()));
        rules.push((re(r"(?s)<ol[^>]*>(.*?)</ol>"), "$1\n".to_string()));
        rules.push((re(r"(?s)<li[^>]*>(.*?)</li>"), "- $1\n".to_string()));

        // Fenced blocks before inline code so the pre+code pair is still intact.
        rules.push((
            re(r"(?s)<pre[^>]*><code[^>]*>(.*?)</code></pre>"),
            "```\n$1\n```\n\n".to_string(),
        ));
        rules.push((re(r"(?s)<code[^>]*>(.*?)</code>"), "`$1`".to_string()));

        rules.push((re(r"(?s)<strong[^>]*>(.*?)</strong>"), "**$1**".to_string()));
        rules.push((re(r"(?s)<em[^>]*>(.*?)</em>"), "*$1*".to_string()));

        rules.push((re(r"<br[^>]*>"), "\n".to_string()));

        Self {
            chrome,
            containers,
            rules,
            any_tag: re(r"<[^>]*>"),
            excess_newlines: re(r"\n{3,}"),
            title: re(r"(?s)<title[^>]*>(.*?)</title>"),
        }
    }

    /// Convert HTML to Markdown. Never fails; unrecognized markup is
    /// stripped verbatim.
    pub fn normalize(&self, html: &str) -> String {
        let mut content = html.to_string();

        for pattern in &self.chrome {
            content = pattern.replace_all(&content, "").into_owned();
        }

        let mut md = self.main_content(&content);

        for (pattern, replacement) in &self.rules {
            md = pattern.replace_all(&md, replacement.as_str()).into_owned();
        }

        md = self.any_tag.replace_all(&md, "").into_owned();

        // Only the three common entities; this is not a general decoder.
        md = md
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");

        self.excess_newlines.replace_all(&md, "\n\n").into_owned()
    }

    /// The `<title>` element text, if present and non-empty.
    pub fn extract_title(&self, html: &str) -> Option<String> {
        self.title
            .captures(html)
            .map(|caps| caps[1].trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Narrowest recognizable content container, falling back to the whole
    /// document when none matches.
    fn main_content(&self, html: &str) -> String {
        for container in &self.containers {
            if let Some(caps) = container.captures(html) {
                return caps[1].to_string();
            }
        }
        html.to_string()
    }
}

impl Default for HtmlNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
