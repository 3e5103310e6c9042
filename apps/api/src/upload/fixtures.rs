//! Test-only PDF builder.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

pub enum FixturePage<'a> {
    /// Shows the text in Helvetica.
    Text(&'a str),
    /// Selects font `F9`, which the page resources do not define.
    UndefinedFont,
}

/// A minimal PDF with one page per entry, each showing its text in Helvetica.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let pages: Vec<FixturePage> = pages.iter().map(|t| FixturePage::Text(t)).collect();
    pdf_from_pages(&pages)
}

pub fn pdf_from_pages(pages: &[FixturePage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let (font, text) = match page {
            FixturePage::Text(text) => ("F1", *text),
            FixturePage::UndefinedFont => ("F9", "Unreadable"),
        };
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
