//! Builds the sorted dictionary and remaps the normalized token stream onto
//! it. Id 0 is reserved for the BWT sentinel; dictionary ids start at 1.

use std::collections::HashMap;

/// Returns the lex-sorted dictionary and the per-token ids (1-based) in
/// original stream order.
pub fn build(tokens: &[String]) -> (Vec<String>, Vec<u32>) {
    let mut first_seen: HashMap<&str, u32> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut raw_ids: Vec<u32> = Vec::with_capacity(tokens.len());

    for tok in tokens {
        let id = match first_seen.get(tok.as_str()) {
            Some(&id) => id,
            None => {
                let id = order.len() as u32;
                order.push(tok.clone());
                first_seen.insert(tok.as_str(), id);
                id
            }
        };
        raw_ids.push(id);
    }

    let mut sorted: Vec<(usize, String)> = order.into_iter().enumerate().collect();
    sorted.sort_by(|a, b| a.1.cmp(&b.1));

    let mut remap = vec![0u32; sorted.len()];
    let mut dict = Vec::with_capacity(sorted.len());
    for (new_idx, (old_idx, tok)) in sorted.into_iter().enumerate() {
        remap[old_idx] = (new_idx + 1) as u32;
        dict.push(tok);
    }

    let ids: Vec<u32> = raw_ids.into_iter().map(|old| remap[old as usize]).collect();
    (dict, ids)
}
