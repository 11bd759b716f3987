use rand::Rng;
use skipbucket::SkipList;

fn main() {
    let mut rng = rand::thread_rng();
    let mut l = SkipList::<u32, u32>::new();
    l.insert(50, 50);
    for _ in 0..20 {
        let k = rng.gen::<u32>() % 100;
        l.insert(k, k);
    }
    l.insert(50, 51);
    println!("{:?}", l);
    println!("nodes: {}, levels: {}", l.len(), l.height());
}
