use item_based_recommender::{links_ok, Popularity, Recommender, SelectionPolicy, Unweighted};

fn main() {
    // tags of the items the user liked: (item, tag)
    let liked: [(u64, u64); 6] = [(1, 1), (1, 2), (3, 1), (3, 3), (5, 1), (5, 4)];
    // tags of the items that can be recommended
    let pool: [(u64, u64); 8] = [(2, 1), (2, 2), (4, 1), (4, 5), (6, 2), (6, 6), (7, 7), (7, 8)];

    // best three, every tag weighs the same
    let top = Recommender::new(Unweighted, SelectionPolicy::<f32>::TopK(3));
    let result = top.recommend(links_ok(liked), links_ok(pool)).unwrap();
    println!("Top 3 (unweighted):\n{}", result);

    // everything above 0.6, common tags weigh more
    let threshold = Recommender::new(Popularity, SelectionPolicy::<f32>::Threshold(0.6));
    let result = threshold.recommend(links_ok(liked), links_ok(pool)).unwrap();
    println!("Threshold 0.6 (popularity):\n{}", result);
    println!("{:#?}", result);
}
