//! Multimedia objects
//!
//!     GEDCOM 5.5.1 nests `FORM` and `TITL` under each `FILE`; 5.5 puts them next to a
//!     single `FILE`. Both layouts fill the same [MultimediaFile] list.
//!
//! [MultimediaFile]: crate::gedcom::records::MultimediaFile

use super::{base_tag, raw, scalar, Context, Step};
use crate::gedcom::parsing::node::TextField;
use crate::gedcom::records::{Multimedia, MultimediaFile};
use crate::gedcom::token::LineToken;

pub fn handle(media: &mut Multimedia, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    match (depth, token.tag()) {
        (1, "FILE") => media.files.push(MultimediaFile {
            path: token.value.text().trim().to_string(),
            ..MultimediaFile::default()
        }),
        (1, "FORM") | (2, "FORM") if depth == 1 || cx.parent_is("FILE") => {
            media.current_file().format = scalar(token)
        }
        (1, "TITL") | (2, "TITL") if depth == 1 || cx.parent_is("FILE") => {
            media.current_file().title = scalar(token)
        }
        (2, "TYPE" | "MEDI") | (3, "TYPE" | "MEDI") if cx.parent_is("FORM") => {
            media.current_file().media_type = scalar(token)
        }
        (1, "BLOB") => return Step::Text(TextField::Blob, raw(token)),
        _ => return base_tag(&mut media.base, token, depth, cx),
    }
    Step::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::config::RecordOptions;
    use crate::gedcom::lexing::Newline;
    use crate::gedcom::parsing::state::ParseScope;
    use crate::gedcom::token::LineValue;
    use std::rc::Rc;

    fn token(tag: &str, value: &str) -> LineToken {
        LineToken {
            level: 1,
            xref: None,
            tag: Rc::from(tag),
            value: LineValue::Data(value.to_string()),
            line: 1,
        }
    }

    fn feed(media: &mut Multimedia, scope: &mut ParseScope, parent: Option<&str>, depth: u8, tag: &str, value: &str) {
        let mut cx = Context {
            scope,
            parent: parent.map(Rc::from),
        };
        handle(media, &token(tag, value), depth, &mut cx);
    }

    #[test]
    fn test_nested_file_layout() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut media = Multimedia::new("M1");
        feed(&mut media, &mut scope, None, 1, "FILE", "photo.jpg");
        feed(&mut media, &mut scope, Some("FILE"), 2, "FORM", "jpg");
        feed(&mut media, &mut scope, Some("FORM"), 3, "TYPE", "photo");
        feed(&mut media, &mut scope, Some("FILE"), 2, "TITL", "Wedding");

        let file = &media.files[0];
        assert_eq!(file.path, "photo.jpg");
        assert_eq!(file.format.as_deref(), Some("jpg"));
        assert_eq!(file.media_type.as_deref(), Some("photo"));
        assert_eq!(file.title.as_deref(), Some("Wedding"));
    }

    #[test]
    fn test_flat_layout_without_file() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut media = Multimedia::new("M1");
        feed(&mut media, &mut scope, None, 1, "FORM", "bmp");
        feed(&mut media, &mut scope, None, 1, "TITL", "Scan");

        assert_eq!(media.files.len(), 1);
        assert_eq!(media.files[0].format.as_deref(), Some("bmp"));
        assert_eq!(media.files[0].title.as_deref(), Some("Scan"));
    }
}
