use crate::models::TrackNode;

/// Flatten a possibly nested tracklist into the linear sequence of tag targets.
///
/// Pre-order: a `track` node comes before its own sub-tracks, and sub-tracks count
/// as tracks of their own. Nodes of any other kind (headings, index groups) only
/// contribute their sub-tracks. With `skip_subtracks` children are ignored entirely
/// and stay attached to their parent, which lets the merge fold them into its title.
///
/// Emitted nodes never carry sub-tracks that were also emitted, so flattening an
/// already flattened list is a no-op.
pub fn flatten(nodes: &[TrackNode], skip_subtracks: bool) -> Vec<TrackNode> {
    let mut out = Vec::with_capacity(nodes.len());
    flatten_into(nodes, skip_subtracks, &mut out);
    out
}

fn flatten_into(nodes: &[TrackNode], skip_subtracks: bool, out: &mut Vec<TrackNode>) {
    for node in nodes {
        if skip_subtracks {
            if node.is_track() {
                out.push(node.clone());
            }
            continue;
        }

        if node.is_track() {
            out.push(TrackNode { sub_tracks: None, ..node.clone() });
        }
        if let Some(children) = &node.sub_tracks {
            flatten_into(children, skip_subtracks, out);
        }
    }
}
