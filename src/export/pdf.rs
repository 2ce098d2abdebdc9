use crate::export::raster::Raster;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

struct PageBuf {
    page_id: Ref,
    content_id: Ref,
    content: Content,
    images: Vec<(String, Ref)>,
}

/// Flowing, top-down document writer.
///
/// `y` is measured from the top edge of the page, like a text cursor; it is
/// converted to PDF coordinates only when drawing.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    pages: Vec<PageBuf>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    bottom: f32,
    y: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,
    image_count: usize,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"));

        let mut manager = Self {
            pdf,
            catalog_id,
            pages_id,
            pages: Vec::new(),

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            bottom: 50.0,
            y: 40.0,

            next_id: 5,
            font_id,
            bold_font_id,
            image_count: 0,
        };
        manager.new_page();
        manager
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn new_page(&mut self) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.pages.push(PageBuf {
            page_id,
            content_id,
            content: Content::new(),
            images: Vec::new(),
        });
        self.y = self.margin;
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Break the page when fewer than `needed` points remain above the
    /// bottom margin.
    pub fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > self.page_h - self.bottom {
            self.new_page();
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Draw one line of text with its baseline at the cursor.
    pub fn text(&mut self, x: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { b"F2".as_slice() } else { b"F1".as_slice() };
        let y = self.page_h - self.y;
        let bytes = encode(text);
        if let Some(page) = self.pages.last_mut() {
            let content = &mut page.content;
            content.begin_text();
            content.set_font(Name(font), size);
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
            content.show(Str(&bytes));
            content.end_text();
        }
    }

    /// Write `text` line by line, wrapped to `width` points, advancing
    /// `line_h` per line and breaking pages as needed.
    pub fn wrapped(&mut self, x: f32, width: f32, size: f32, line_h: f32, text: &str) {
        let columns = ((width / (size * 0.5)) as usize).max(10);
        for paragraph in text.lines() {
            for line in textwrap::wrap(paragraph, columns) {
                self.ensure_space(0.0);
                self.text(x, size, false, &line);
                self.y += line_h;
            }
        }
    }

    /// Place an image with its top-left corner at (`x`, cursor) and advance
    /// past it.
    pub fn image(&mut self, raster: &Raster, x: f32, w: f32, h: f32) {
        let image_id = self.fresh_ref();
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        let mut xobj = self.pdf.image_xobject(image_id, &raster.data);
        xobj.filter(Filter::FlateDecode);
        xobj.width(raster.width as i32);
        xobj.height(raster.height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        drop(xobj);

        let bottom_y = self.page_h - self.y - h;
        if let Some(page) = self.pages.last_mut() {
            let content = &mut page.content;
            content.save_state();
            content.transform([w, 0.0, 0.0, h, x, bottom_y]);
            content.x_object(Name(name.as_bytes()));
            content.restore_state();
            page.images.push((name, image_id));
        }
        self.y += h;
    }

    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn page_height(&self) -> f32 {
        self.page_h
    }

    pub fn finish(mut self) -> Vec<u8> {
        let pages = std::mem::take(&mut self.pages);
        let kids: Vec<Ref> = pages.iter().map(|p| p.page_id).collect();

        for page in pages {
            self.pdf.stream(page.content_id, &page.content.finish());

            let mut writer = self.pdf.page(page.page_id);
            writer
                .parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(page.content_id);

            let mut resources = writer.resources();
            resources
                .fonts()
                .pair(Name(b"F1"), self.font_id)
                .pair(Name(b"F2"), self.bold_font_id);
            if !page.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, id) in &page.images {
                    xobjects.pair(Name(name.as_bytes()), *id);
                }
            }
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut tree = self.pdf.pages(self.pages_id);
        tree.count(kids.len() as i32);
        tree.kids(kids);
        drop(tree);

        self.pdf.finish()
    }
}

/// Standard fonts only cover single-byte text: keep printable ASCII and
/// replace the rest.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else if c == '\t' {
                b' '
            } else {
                b'?'
            }
        })
        .collect()
}
