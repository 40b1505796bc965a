use crate::compositor::FrameCompositor;
use crate::error::SlitscanResult;
use crate::observer::RunObserver;
use crate::source::FrameSource;

/// Feeds one decoded frame stream to every compositor, so the expensive
/// decode happens once no matter how many output variants are requested.
///
/// Delivery stops when the stream is exhausted or every compositor is
/// complete; one compositor finishing early never starves the others.
/// Returns the number of frames pulled from the source.
#[tracing::instrument(skip_all, fields(runs = compositors.len()))]
pub fn run_compositors(
    source: &mut dyn FrameSource,
    compositors: &mut [FrameCompositor],
    observer: &mut dyn RunObserver,
) -> SlitscanResult<u64> {
    let mut delivered = 0u64;
    while compositors.iter().any(|c| !c.is_complete()) {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            // A single unreadable frame concludes the run with whatever
            // slices were already written.
            Err(e) => {
                tracing::warn!("frame read failed, treating as end of stream: {e}");
                break;
            }
        };
        delivered += 1;
        for compositor in compositors.iter_mut().filter(|c| !c.is_complete()) {
            compositor.offer_frame(&frame, observer)?;
        }
    }

    // Compositors that filled their canvas already reported completion; for
    // the rest the stream running out is what ends the run.
    for compositor in compositors.iter().filter(|c| !c.is_complete()) {
        observer.run_complete(compositor.name(), compositor.accepted_frames());
    }
    Ok(delivered)
}
