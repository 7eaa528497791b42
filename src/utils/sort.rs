use core::mem;

/// u64-key radix sort for SoA (inds/vals).
/// - Sorts by inds ascending
/// - Reorders vals accordingly
/// - Stable for equal keys
///
/// Complexity: 8 passes, each O(n + 256)
pub fn radix_sort_u64_soa<N: Copy>(inds: &mut [u64], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort is often faster than allocating scratch.
    if n <= 32 {
        insertion_sort_u64_soa(inds, vals);
        return;
    }

    let mut inds_tmp = vec![0u64; n];
    let mut vals_tmp: Vec<N> = vals.to_vec();

    let mut src_inds: &mut [u64] = inds;
    let mut src_vals: &mut [N] = vals;
    let mut dst_inds: &mut [u64] = &mut inds_tmp;
    let mut dst_vals: &mut [N] = &mut vals_tmp;

    let mut passes = 0usize;

    // 8 passes: byte 0..7 (LSD)
    for shift in (0u32..64).step_by(8) {
        let mut count = [0usize; 256];

        for &k in src_inds.iter() {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        // 全キーが同じバケットならこのバイトは並べ替え不要
        if count.iter().any(|&c| c == n) {
            continue;
        }

        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for idx in 0..n {
            let k = src_inds[idx];
            let b = ((k >> shift) & 0xFF) as usize;
            let pos = count[b];
            count[b] = pos + 1;
            dst_inds[pos] = k;
            dst_vals[pos] = src_vals[idx];
        }

        mem::swap(&mut src_inds, &mut dst_inds);
        mem::swap(&mut src_vals, &mut dst_vals);
        passes += 1;
    }

    // Skipped passes make the parity vary: after an odd count the result sits in the scratch buffers.
    if passes % 2 == 1 {
        dst_inds.copy_from_slice(src_inds);
        dst_vals.copy_from_slice(src_vals);
    }
}

/// Tiny insertion sort for small n (SoA).
#[inline(always)]
fn insertion_sort_u64_soa<N: Copy>(inds: &mut [u64], vals: &mut [N]) {
    let n = inds.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compare with stable baseline:
    /// sort by key, and if key is equal, preserve original order (stable).
    fn baseline_stable_sort<N: Copy>(inds: &[u64], vals: &[N]) -> (Vec<u64>, Vec<N>) {
        let mut pairs: Vec<(u64, usize, N)> = inds
            .iter()
            .copied()
            .enumerate()
            .map(|(i, k)| (k, i, vals[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        pairs.into_iter().map(|(k, _, v)| (k, v)).unzip()
    }

    /// tiny deterministic PRNG (xorshift64)
    struct Rng(u64);
    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
    }

    #[test]
    fn radix_sort_handles_empty_and_single() {
        let mut inds: Vec<u64> = vec![];
        let mut vals: Vec<f32> = vec![];
        radix_sort_u64_soa(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u64];
        let mut vals = vec![0.5f32];
        radix_sort_u64_soa(&mut inds, &mut vals);
        assert_eq!(inds, vec![42]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn insertion_path_preserves_pairing() {
        let mut inds = vec![3u64, 1, 3, 2, 1, 3, 0];
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
        radix_sort_u64_soa(&mut inds, &mut vals);
        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }

    #[test]
    fn radix_path_matches_stable_baseline() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        let mut inds: Vec<u64> = (0..1000).map(|_| rng.next_u64() % 5000).collect();
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
        radix_sort_u64_soa(&mut inds, &mut vals);
        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }

    #[test]
    fn radix_path_handles_full_width_keys() {
        let mut rng = Rng(0xDEAD_BEEF_CAFE_F00D);
        let mut inds: Vec<u64> = (0..257).map(|_| rng.next_u64()).collect();
        inds.push(u64::MAX);
        inds.push(0);
        let mut vals: Vec<u64> = inds.clone();
        radix_sort_u64_soa(&mut inds, &mut vals);
        assert!(inds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(inds, vals);
    }
}
