//! Embedded audio/video and animated images.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{MediaRef, PartFailure, Report};
use crate::ooxml::opc::constants::part_name::MEDIA_DIR;

pub struct MediaAudit;

impl Detector for MediaAudit {
    fn name(&self) -> &'static str {
        "media"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let media: Vec<MediaRef> = context
            .relationships()?
            .into_iter()
            .flat_map(|rels| rels.iter())
            .filter_map(|rel| {
                let media_type = rel.reltype().to_lowercase();
                (media_type.contains("video") || media_type.contains("audio")).then(|| MediaRef {
                    id: rel.r_id().to_string(),
                    target: rel.target_ref().to_string(),
                    media_type,
                })
            })
            .collect();

        let gifs: Vec<String> = context
            .package
            .iter_names()
            .filter(|name| name.starts_with(MEDIA_DIR) && name.to_lowercase().ends_with(".gif"))
            .map(str::to_string)
            .collect();

        report.summary.flag(media.len() + gifs.len());
        report.details.embedded_media = Some(media);
        report.details.gifs_detected = Some(gifs);
        Ok(())
    }
}
