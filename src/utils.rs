use indicatif::{ProgressBar, ProgressStyle};

/// Return a loading bar for the given task, or an hidden one when not verbose.
///
/// # Arguments
///
/// * `verbose`: bool - Whether to actually show the loading bar.
/// * `desc`: &str - Description of the task.
/// * `total_iterations`: usize - Number of iterations of the task.
pub(crate) fn get_loading_bar(verbose: bool, desc: &str, total_iterations: usize) -> ProgressBar {
    if !verbose {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total_iterations as u64);
    pb.set_draw_delta(total_iterations as u64 / 100 + 1);
    pb.set_style(ProgressStyle::default_bar().template(&format!(
        "{} {{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] ({{pos}}/{{len}}, ETA {{eta}})",
        desc
    )));
    pb
}
