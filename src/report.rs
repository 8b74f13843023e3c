//! Slide Deck Report Module
//! Assembles the findings deck as an OOXML presentation.
//!
//! The `.pptx` package is generated directly as ZIP + XML so chart images
//! and generated narrative text can be embedded without an office
//! dependency. Three slide kinds: title, bullet findings, charts
//! (up to two images side by side under a heading).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::FileOptions;
use zip::ZipWriter;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to write deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to assemble deck package: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// Standard 16:9 slide dimensions (in EMU)
const SLIDE_WIDTH: i64 = 9144000; // 10 inches
const SLIDE_HEIGHT: i64 = 6858000; // 7.5 inches

const MARGIN: i64 = EMU_PER_INCH / 2;
const GAP: i64 = EMU_PER_INCH / 4;
const HEADING_HEIGHT: i64 = EMU_PER_INCH * 9 / 10;

enum Slide {
    Title { subtitle: String },
    Bullets { heading: String, bullets: Vec<String> },
    Charts { heading: String, images: Vec<PathBuf> },
}

/// Incrementally composed findings deck.
pub struct DeckBuilder {
    title: String,
    slides: Vec<Slide>,
}

impl DeckBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            slides: Vec::new(),
        }
    }

    /// Opening slide with the deck title and a subtitle line.
    pub fn title_slide(&mut self, subtitle: &str) -> &mut Self {
        self.slides.push(Slide::Title {
            subtitle: subtitle.to_string(),
        });
        self
    }

    /// Narrative slide: heading plus bullet list.
    pub fn bullet_slide(&mut self, heading: &str, bullets: &[String]) -> &mut Self {
        self.slides.push(Slide::Bullets {
            heading: heading.to_string(),
            bullets: bullets.to_vec(),
        });
        self
    }

    /// Chart slide: heading plus up to two images side by side. Longer
    /// image lists are split across consecutive slides.
    pub fn chart_slide(&mut self, heading: &str, images: &[PathBuf]) -> &mut Self {
        for chunk in images.chunks(2) {
            self.slides.push(Slide::Charts {
                heading: heading.to_string(),
                images: chunk.to_vec(),
            });
        }
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Write the deck as a `.pptx` package.
    pub fn save(&self, output_path: &Path) -> Result<(), DeckError> {
        let file = File::create(output_path)?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();

        let slide_count = self.slides.len();

        // Images get global one-based ids in slide order
        let mut image_paths: Vec<&PathBuf> = Vec::new();
        for slide in &self.slides {
            if let Slide::Charts { images, .. } = slide {
                image_paths.extend(images.iter());
            }
        }

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types_xml(slide_count).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(RELS_XML.as_bytes())?;

        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
        zip.write_all(presentation_rels_xml(slide_count).as_bytes())?;

        zip.start_file("ppt/presentation.xml", options)?;
        zip.write_all(presentation_xml(slide_count).as_bytes())?;

        let mut next_image = 1usize;
        for (idx, slide) in self.slides.iter().enumerate() {
            let slide_num = idx + 1;
            let image_ids: Vec<usize> = match slide {
                Slide::Charts { images, .. } => {
                    let ids = (next_image..next_image + images.len()).collect();
                    next_image += images.len();
                    ids
                }
                _ => Vec::new(),
            };

            zip.start_file(format!("ppt/slides/_rels/slide{slide_num}.xml.rels"), options)?;
            zip.write_all(slide_rels_xml(&image_ids).as_bytes())?;

            zip.start_file(format!("ppt/slides/slide{slide_num}.xml"), options)?;
            zip.write_all(self.slide_xml(slide, &image_ids).as_bytes())?;
        }

        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(SLIDE_LAYOUT_XML.as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(LAYOUT_RELS_XML.as_bytes())?;

        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        zip.write_all(SLIDE_MASTER_XML.as_bytes())?;
        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        zip.write_all(MASTER_RELS_XML.as_bytes())?;

        zip.start_file("ppt/theme/theme1.xml", options)?;
        zip.write_all(THEME_XML.as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(core_props_xml(&self.title).as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(app_props_xml(slide_count).as_bytes())?;

        for (idx, path) in image_paths.iter().enumerate() {
            let bytes = fs::read(path)?;
            zip.start_file(format!("ppt/media/image{}.png", idx + 1), options)?;
            zip.write_all(&bytes)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn slide_xml(&self, slide: &Slide, image_ids: &[usize]) -> String {
        let mut shapes = String::new();
        let mut shape_id = 2usize;

        match slide {
            Slide::Title { subtitle } => {
                shapes.push_str(&text_box_xml(
                    shape_id,
                    MARGIN,
                    SLIDE_HEIGHT / 3,
                    SLIDE_WIDTH - 2 * MARGIN,
                    EMU_PER_INCH * 3 / 2,
                    &self.title,
                    4000,
                    true,
                    true,
                ));
                shape_id += 1;
                shapes.push_str(&text_box_xml(
                    shape_id,
                    MARGIN,
                    SLIDE_HEIGHT / 3 + EMU_PER_INCH * 3 / 2,
                    SLIDE_WIDTH - 2 * MARGIN,
                    EMU_PER_INCH,
                    subtitle,
                    2000,
                    false,
                    true,
                ));
            }
            Slide::Bullets { heading, bullets } => {
                shapes.push_str(&text_box_xml(
                    shape_id,
                    MARGIN,
                    MARGIN / 2,
                    SLIDE_WIDTH - 2 * MARGIN,
                    HEADING_HEIGHT,
                    heading,
                    2800,
                    true,
                    false,
                ));
                shape_id += 1;
                shapes.push_str(&bullet_box_xml(
                    shape_id,
                    MARGIN,
                    MARGIN / 2 + HEADING_HEIGHT + GAP,
                    SLIDE_WIDTH - 2 * MARGIN,
                    SLIDE_HEIGHT - MARGIN - HEADING_HEIGHT - GAP,
                    bullets,
                ));
            }
            Slide::Charts { heading, images } => {
                shapes.push_str(&text_box_xml(
                    shape_id,
                    MARGIN,
                    MARGIN / 2,
                    SLIDE_WIDTH - 2 * MARGIN,
                    HEADING_HEIGHT,
                    heading,
                    2800,
                    true,
                    false,
                ));
                shape_id += 1;

                let top = MARGIN / 2 + HEADING_HEIGHT + GAP;
                let content_w = SLIDE_WIDTH - 2 * MARGIN;
                let content_h = SLIDE_HEIGHT - top - MARGIN / 2;
                let count = images.len().max(1) as i64;
                let img_w = (content_w - GAP * (count - 1)) / count;

                for (pos, _) in images.iter().enumerate() {
                    let x = MARGIN + pos as i64 * (img_w + GAP);
                    let r_id = pos + 2; // rId1 is the layout
                    shapes.push_str(&picture_xml(shape_id, r_id, x, top, img_w, content_h));
                    shape_id += 1;
                }
                // image_ids only fixes global media numbering; the slide
                // references images through its own rels
                debug_assert_eq!(image_ids.len(), images.len());
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{shapes}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#
        )
    }
}

/// Escape text for embedding in XML content.
fn xml_escape(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '&' => "&amp;".chars().collect::<Vec<_>>(),
            '<' => "&lt;".chars().collect(),
            '>' => "&gt;".chars().collect(),
            '"' => "&quot;".chars().collect(),
            '\'' => "&apos;".chars().collect(),
            other => vec![other],
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn text_box_xml(
    id: usize,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
    text: &str,
    size: u32,
    bold: bool,
    centered: bool,
) -> String {
    let bold = if bold { r#" b="1""# } else { "" };
    let align = if centered { r#"<a:pPr algn="ctr"/>"# } else { "" };
    format!(
        r#"<p:sp>
<p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
<p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>
<a:p>{align}<a:r><a:rPr lang="en-US" sz="{size}"{bold}/><a:t>{text}</a:t></a:r></a:p>
</p:txBody>
</p:sp>"#,
        text = xml_escape(text),
    )
}

fn bullet_box_xml(id: usize, x: i64, y: i64, cx: i64, cy: i64, bullets: &[String]) -> String {
    let mut paragraphs = String::new();
    for bullet in bullets {
        paragraphs.push_str(&format!(
            r#"<a:p><a:pPr marL="285750" indent="-285750"><a:buChar char="&#8226;"/></a:pPr><a:r><a:rPr lang="en-US" sz="1800"/><a:t>{}</a:t></a:r></a:p>"#,
            xml_escape(bullet),
        ));
        paragraphs.push('\n');
    }
    format!(
        r#"<p:sp>
<p:nvSpPr><p:cNvPr id="{id}" name="Content {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
<p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>
{paragraphs}</p:txBody>
</p:sp>"#
    )
}

fn picture_xml(id: usize, r_id: usize, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        r#"<p:pic>
<p:nvPicPr>
<p:cNvPr id="{id}" name="Chart {id}"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId{r_id}"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>"#
    )
}

fn content_types_xml(slide_count: usize) -> String {
    let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#
    .to_string();

    for i in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
        ));
        xml.push('\n');
    }
    xml.push_str("</Types>");
    xml
}

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#
    .to_string();

    for i in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 2,
            i
        ));
        xml.push('\n');
    }
    xml.push_str("</Relationships>");
    xml
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for i in 1..=slide_count {
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            255 + i,
            i + 2
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{slide_ids}</p:sldIdLst>
<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}" type="screen16x9"/>
<p:notesSz cx="{SLIDE_HEIGHT}" cy="{SLIDE_WIDTH}"/>
</p:presentation>"#
    )
}

fn slide_rels_xml(image_ids: &[usize]) -> String {
    let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
"#
    .to_string();

    for (idx, img_id) in image_ids.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>"#,
            idx + 2,
            img_id
        ));
        xml.push('\n');
    }
    xml.push_str("</Relationships>");
    xml
}

const SLIDE_LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

const LAYOUT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const SLIDE_MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#;

const MASTER_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
<a:themeElements>
<a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln><a:ln w="12700" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln><a:ln w="19050" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#;

fn core_props_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>workscope</dc:creator>
<cp:lastModifiedBy>workscope</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        xml_escape(title)
    )
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<TotalTime>0</TotalTime>
<Words>0</Words>
<Application>workscope</Application>
<PresentationFormat>On-screen Show (16:9)</PresentationFormat>
<Slides>{slide_count}</Slides>
<Notes>0</Notes>
<HiddenSlides>0</HiddenSlides>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_escape_handles_special_characters() {
        assert_eq!(
            xml_escape(r#"a < b & "c" > 'd'"#),
            "a &lt; b &amp; &quot;c&quot; &gt; &apos;d&apos;"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn chart_slides_split_after_two_images() {
        let mut deck = DeckBuilder::new("Test");
        deck.chart_slide(
            "Charts",
            &[
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.png"),
            ],
        );
        assert_eq!(deck.slide_count(), 2);
    }

    #[test]
    fn saved_deck_is_a_readable_package() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.pptx");

        let mut deck = DeckBuilder::new("Remote Work Findings");
        deck.title_slide("Productivity & mental health, IT roles");
        deck.bullet_slide(
            "Key findings",
            &[
                "Work setting shows no material effect on performance".to_string(),
                "Scores & ratings are near-identical across groups".to_string(),
            ],
        );
        deck.save(&out).unwrap();

        let file = File::open(&out).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert!(archive.by_name("ppt/presentation.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());
        assert!(archive.by_name("[Content_Types].xml").is_ok());
    }

    #[test]
    fn deck_embeds_chart_images() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("chart.png");
        std::fs::write(&img, b"\x89PNG\r\n\x1a\nstub").unwrap();

        let out = dir.path().join("deck.pptx");
        let mut deck = DeckBuilder::new("Charts");
        deck.title_slide("With one chart");
        deck.chart_slide("Overview", &[img]);
        deck.save(&out).unwrap();

        let file = File::open(&out).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert!(archive.by_name("ppt/media/image1.png").is_ok());
        assert!(archive.by_name("ppt/slides/_rels/slide2.xml.rels").is_ok());
    }
}
