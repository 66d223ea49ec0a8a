//! Stop words removed before TF-IDF weighting

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;

/// Base Indonesian stop-word set
pub const INDONESIAN: &[&str] = &[
    "ada", "adalah", "adanya", "adapun", "agak", "agaknya", "agar", "akan", "akankah", "akhir",
    "akhirnya", "aku", "akulah", "amat", "amatlah", "anda", "andalah", "antar", "antara",
    "antaranya", "apa", "apaan", "apabila", "apakah", "apalagi", "apatah", "artinya", "asal",
    "asalkan", "atas", "atau", "ataukah", "ataupun", "awal", "awalnya", "bagai", "bagaikan",
    "bagaimana", "bagaimanakah", "bagaimanapun", "bagi", "bagian", "bahkan", "bahwa",
    "bahwasanya", "baik", "bakal", "bakalan", "balik", "banyak", "bapak", "baru", "bawah",
    "beberapa", "begini", "beginian", "beginikah", "beginilah", "begitu", "begitukah",
    "begitulah", "begitupun", "bekerja", "belakang", "belakangan", "belum", "belumlah",
    "benar", "benarkah", "benarlah", "berada", "berakhir", "berakhirlah", "berakhirnya",
    "berapa", "berapakah", "berapalah", "berapapun", "berarti", "berawal", "berbagai",
    "berdatangan", "beri", "berikan", "berikut", "berikutnya", "berjumlah", "berkata",
    "berkehendak", "berkeinginan", "berkenaan", "berlainan", "berlalu", "berlangsung",
    "berlebihan", "bermacam", "bermaksud", "bermula", "bersama", "bersiap", "bertanya",
    "berturut", "bertutur", "berujar", "berupa", "besar", "betul", "betulkah", "biasa",
    "biasanya", "bila", "bilakah", "bisa", "bisakah", "boleh", "bolehkah", "bolehlah", "buat",
    "bukan", "bukankah", "bukanlah", "bukannya", "bulan", "bung", "cara", "caranya", "cukup",
    "cukupkah", "cukuplah", "cuma", "dahulu", "dalam", "dan", "dapat", "dari", "daripada",
    "datang", "dekat", "demi", "demikian", "demikianlah", "dengan", "depan", "di", "dia",
    "diakhiri", "diakhirinya", "dialah", "diantara", "diantaranya", "diberi", "diberikan",
    "diberikannya", "dibuat", "dibuatnya", "didapat", "didatangkan", "digunakan", "diibaratkan",
    "diingat", "diingatkan", "diinginkan", "dijawab", "dijelaskan", "dijelaskannya", "dikarenakan",
    "dikatakan", "dikatakannya", "dikerjakan", "diketahui", "diketahuinya", "dikira", "dilakukan",
    "dilalui", "dilihat", "dimaksud", "dimaksudkan", "dimaksudkannya", "dimaksudnya", "diminta",
    "dimintai", "dimisalkan", "dimulai", "dimulailah", "dimulainya", "dimungkinkan", "dini",
    "dipastikan", "diperbuat", "diperbuatnya", "dipergunakan", "diperkirakan", "diperlihatkan",
    "diperlukan", "diperlukannya", "dipersoalkan", "dipertanyakan", "dipunyai", "diri", "dirinya",
    "disampaikan", "disebut", "disebutkan", "disebutkannya", "disini", "disinilah", "ditambahkan",
    "ditandaskan", "ditanya", "ditanyai", "ditanyakan", "ditegaskan", "ditujukan", "ditunjuk",
    "ditunjuki", "ditunjukkan", "ditunjukkannya", "ditunjuknya", "dituturkan", "dituturkannya",
    "diucapkan", "diucapkannya", "diungkapkan", "dong", "dua", "dulu", "empat", "enggak",
    "enggaknya", "entah", "entahlah", "guna", "gunakan", "hal", "hampir", "hanya", "hanyalah",
    "hari", "harus", "haruslah", "harusnya", "hendak", "hendaklah", "hendaknya", "hingga", "ia",
    "ialah", "ibarat", "ibaratkan", "ibaratnya", "ibu", "ikut", "ingat", "ingin", "inginkah",
    "inginkan", "ini", "inikah", "inilah", "itu", "itukah", "itulah", "jadi", "jadilah",
    "jadinya", "jangan", "jangankan", "janganlah", "jauh", "jawab", "jawaban", "jawabnya",
    "jelas", "jelaskan", "jelaslah", "jelasnya", "jika", "jikalau", "juga", "jumlah",
    "jumlahnya", "justru", "kala", "kalau", "kalaulah", "kalaupun", "kalian", "kami", "kamilah",
    "kamu", "kamulah", "kan", "kapan", "kapankah", "kapanpun", "karena", "karenanya", "kasus",
    "kata", "katakan", "katakanlah", "katanya", "ke", "keadaan", "kebetulan", "kecil", "kedua",
    "keduanya", "keinginan", "kelamaan", "kelihatan", "kelihatannya", "kelima", "keluar",
    "kembali", "kemudian", "kemungkinan", "kemungkinannya", "kenapa", "kepada", "kepadanya",
    "kesampaian", "keseluruhan", "keseluruhannya", "keterlaluan", "ketika", "khususnya", "kini",
    "kinilah", "kira", "kiranya", "kita", "kitalah", "kok", "kurang", "lagi", "lagian", "lah",
    "lain", "lainnya", "lalu", "lama", "lamanya", "lanjut", "lanjutnya", "lebih", "lewat", "lima",
    "luar", "macam", "maka", "makanya", "makin", "malah", "malahan", "mampu", "mampukah", "mana",
    "manakala", "manalagi", "masa", "masalah", "masalahnya", "masih", "masihkah", "masing",
    "mau", "maupun", "melainkan", "melakukan", "melalui", "melihat", "melihatnya", "memang",
    "memastikan", "memberi", "memberikan", "membuat", "memerlukan", "memihak", "meminta",
    "memintakan", "memisalkan", "memperbuat", "mempergunakan", "memperkirakan",
    "memperlihatkan", "mempersiapkan", "mempersoalkan", "mempertanyakan", "mempunyai",
    "memulai", "memungkinkan", "menaiki", "menambahkan", "menandaskan", "menanti", "menantikan",
    "menanya", "menanyai", "menanyakan", "mendapat", "mendapatkan", "mendatang", "mendatangi",
    "mendatangkan", "menegaskan", "mengakhiri", "mengapa", "mengatakan", "mengatakannya",
    "mengenai", "mengerjakan", "mengetahui", "menggunakan", "menghendaki", "mengibaratkan",
    "mengibaratkannya", "mengingat", "mengingatkan", "menginginkan", "mengira", "mengucapkan",
    "mengucapkannya", "mengungkapkan", "menjadi", "menjawab", "menjelaskan", "menuju",
    "menunjuk", "menunjuki", "menunjukkan", "menunjuknya", "menurut", "menuturkan",
    "menyampaikan", "menyangkut", "menyatakan", "menyebutkan", "menyeluruh", "menyiapkan",
    "merasa", "mereka", "merekalah", "merupakan", "meski", "meskipun", "meyakini", "meyakinkan",
    "minta", "mirip", "misal", "misalkan", "misalnya", "mula", "mulai", "mulailah", "mulanya",
    "mungkin", "mungkinkah", "nah", "naik", "namun", "nanti", "nantinya", "nyaris", "nyatanya",
    "oleh", "olehnya", "pada", "padahal", "padanya", "pak", "paling", "panjang", "pantas", "para",
    "pasti", "pastilah", "penting", "pentingnya", "per", "percuma", "perlu", "perlukah",
    "perlunya", "pernah", "persoalan", "pertama", "pertanyaan", "pertanyakan", "pihak",
    "pihaknya", "pukul", "pula", "pun", "punya", "rasa", "rasanya", "rata", "rupanya", "saat",
    "saatnya", "saja", "sajalah", "saling", "sama", "sambil", "sampai", "sampaikan", "sana",
    "sangat", "sangatlah", "satu", "saya", "sayalah", "se", "sebab", "sebabnya", "sebagai",
    "sebagaimana", "sebagainya", "sebagian", "sebaik", "sebaiknya", "sebaliknya", "sebanyak",
    "sebegini", "sebegitu", "sebelum", "sebelumnya", "sebenarnya", "seberapa", "sebesar",
    "sebetulnya", "sebisanya", "sebuah", "sebut", "sebutlah", "sebutnya", "secara", "secukupnya",
    "sedang", "sedangkan", "sedemikian", "sedikit", "sedikitnya", "seenaknya", "segala",
    "segalanya", "segera", "seharusnya", "sehingga", "seingat", "sejak", "sejauh", "sejenak",
    "sejumlah", "sekadar", "sekadarnya", "sekali", "sekalian", "sekaligus", "sekalipun",
    "sekarang", "sekecil", "seketika", "sekiranya", "sekitar", "sekitarnya", "sela", "selain",
    "selaku", "selalu", "selama", "selamanya", "selanjutnya", "seluruh", "seluruhnya",
    "semacam", "semakin", "semampu", "semampunya", "semasa", "semasih", "semata", "semaunya",
    "sementara", "semisal", "semisalnya", "sempat", "semua", "semuanya", "semula", "sendiri",
    "sendirian", "sendirinya", "seolah", "seorang", "sepanjang", "sepantasnya", "seperlunya",
    "seperti", "sepertinya", "sepihak", "sering", "seringnya", "serta", "serupa", "sesaat",
    "sesama", "sesampai", "sesegera", "sesekali", "seseorang", "sesuatu", "sesuatunya",
    "sesudah", "sesudahnya", "setelah", "setempat", "setengah", "seterusnya", "setiap",
    "setiba", "setibanya", "setidaknya", "setinggi", "seusai", "sewaktu", "siap", "siapa",
    "siapakah", "siapapun", "sini", "sinilah", "soal", "soalnya", "suatu", "sudah", "sudahkah",
    "sudahlah", "supaya", "tadi", "tadinya", "tahu", "tahun", "tak", "tambah", "tambahnya",
    "tampak", "tampaknya", "tandas", "tandasnya", "tanpa", "tanya", "tanyakan", "tanyanya",
    "tapi", "tegas", "tegasnya", "telah", "tempat", "tengah", "tentang", "tentu", "tentulah",
    "tentunya", "tepat", "terakhir", "terasa", "terbanyak", "terdahulu", "terdapat", "terdiri",
    "terhadap", "terhadapnya", "teringat", "terjadi", "terjadilah", "terjadinya", "terkira",
    "terlalu", "terlebih", "terlihat", "termasuk", "ternyata", "tersampaikan", "tersebut",
    "tersebutlah", "tertentu", "tertuju", "terus", "terutama", "tetap", "tetapi", "tiap", "tiba",
    "tidak", "tidakkah", "tidaklah", "tiga", "tinggi", "toh", "tunjuk", "turut", "tutur",
    "tuturnya", "ucap", "ucapnya", "ujar", "ujarnya", "umum", "umumnya", "ungkap", "ungkapnya",
    "untuk", "usah", "usai", "waduh", "wah", "wahai", "waktu", "waktunya", "walau", "walaupun",
    "wong", "yaitu", "yakin", "yakni", "yang",
];

/// Tokens that carry no signal for transaction descriptions, added on top of the base set
pub const DOMAIN_EXTENSION: &[&str] = &[
    "di", "ke", "dari", "atau", "dan", "untuk", "dengan", "pada", "baiknya", "berkali", "kali",
    "kurangnya", "mata", "olah", "sekurang", "setidak", "tama", "tidaknya",
];

/// Built-in base set plus the domain extension, sorted and deduplicated
pub fn default_stop_words() -> Vec<String> {
    with_extension(INDONESIAN.iter().map(|s| s.to_string()))
}

/// Read a stop-word file (one word per line, `#` starts a comment)
pub fn read_stop_words(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect())
}

/// Resolve the stop words used for training
///
/// A custom file replaces the built-in base set. If it cannot be read,
/// training continues without any stop words.
pub fn resolve_stop_words(custom: Option<&Path>) -> Vec<String> {
    match custom {
        None => {
            let words = default_stop_words();
            info!(count = words.len(), "Loaded built-in Indonesian stop words");
            words
        }
        Some(path) => match read_stop_words(path) {
            Ok(base) => {
                let words = with_extension(base.into_iter());
                info!(path = %path.display(), count = words.len(), "Loaded stop words");
                words
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load stop words, training without stop words"
                );
                vec![]
            }
        },
    }
}

fn with_extension(base: impl Iterator<Item = String>) -> Vec<String> {
    let set: BTreeSet<String> = base
        .chain(DOMAIN_EXTENSION.iter().map(|s| s.to_string()))
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_includes_extension() {
        let words = default_stop_words();
        assert!(words.contains(&"yang".to_string()));
        assert!(words.contains(&"tama".to_string()));
        // sorted and unique
        assert!(words.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_read_stop_words_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "Beli").unwrap();
        writeln!(file, "bayar  # trailing comment").unwrap();
        writeln!(file).unwrap();

        let words = read_stop_words(file.path()).unwrap();
        assert_eq!(words, vec!["beli", "bayar"]);

        let resolved = resolve_stop_words(Some(file.path()));
        assert!(resolved.contains(&"beli".to_string()));
        assert!(resolved.contains(&"dengan".to_string()));
        assert!(!resolved.contains(&"yang".to_string()));
    }

    #[test]
    fn test_unreadable_file_means_no_stop_words() {
        let words = resolve_stop_words(Some(Path::new("/nonexistent/stopwords.txt")));
        assert!(words.is_empty());
    }
}
