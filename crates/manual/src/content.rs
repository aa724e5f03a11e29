//! Literal text, colors and file names of the LN Portal manual.

use deck_core::Rgb;

/// Deck written into the working directory on every run.
pub const OUTPUT_FILE: &str = "LNポータル_操作マニュアル.pptx";

/// Background of content slides.
pub const PAGE_BACKGROUND: Rgb = Rgb(248, 250, 252);

/// Numbered section headings on screenshot slides.
pub const ACCENT_RED: Rgb = Rgb(220, 38, 38);

/// Secondary text on the blue cover slides.
pub const PALE_BLUE: Rgb = Rgb(200, 220, 255);

pub const WHITE: Rgb = Rgb(255, 255, 255);

pub const COVER_TITLE: &str = "LNポータルシステム";
pub const COVER_SUBTITLE: &str = "完全操作マニュアル";
pub const COVER_VERSION: &str = "バージョン 1.0 | 2026-02-10";

pub const OVERVIEW_TITLE: &str = "システム概要";
pub const OVERVIEW_INTRO: &str =
    "📊 LNポータルは、発信者情報開示請求・裁判業務を効率化するシステムです";

/// A bold group heading followed by indented items.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub heading: &'static str,
    pub items: &'static [&'static str],
}

pub const OVERVIEW_SECTIONS: [Section; 2] = [
    Section {
        heading: "主な機能",
        items: &[
            "案件（LN）の一元管理",
            "申立書の自動生成",
            "業務マニュアルの提供",
            "実績・レベル管理（ゲーミフィケーション）",
            "フィードバック・改善提案",
        ],
    },
    Section {
        heading: "対象ユーザー",
        items: &[
            "🛡️ beginner（初級者）: 証拠収集、LNチェック",
            "⚔️ expert（中級者）: 申立書作成、書類詰め",
            "🏰 leader（上級者）: 全体管理、発送、指導",
        ],
    },
];

/// A slide pairing an annotated screenshot with numbered callouts.
#[derive(Debug, Clone, Copy)]
pub struct ScreenshotPage {
    pub title: &'static str,
    /// Image path relative to the working directory.
    pub image: &'static str,
    pub sections: [Section; 3],
}

pub const SCREENSHOT_PAGES: [ScreenshotPage; 5] = [
    ScreenshotPage {
        title: "ユーザー選択とホーム画面",
        image: "guide-screenshots/annotated-01-home.png",
        sections: [
            Section {
                heading: "① ユーザー選択",
                items: &["画面上部で自分の名前を選択", "ロールに応じた画面が表示される"],
            },
            Section {
                heading: "② LN一覧クリック",
                items: &["サイドバーから「📄 LN一覧」をクリック", "全案件の一覧が表示される"],
            },
            Section {
                heading: "③ サマリー確認",
                items: &[
                    "全LN: 総案件数",
                    "今日やること: 本日対応が必要な案件数",
                    "完了・処理中: 進捗状況",
                ],
            },
        ],
    },
    ScreenshotPage {
        title: "LN一覧画面",
        image: "guide-screenshots/annotated-02-ln-list.png",
        sections: [
            Section {
                heading: "① タブ切替",
                items: &["全LN: すべての案件を表示", "今日やること: 本日対応が必要な案件のみ"],
            },
            Section {
                heading: "② 検索",
                items: &["訴番・申立人・相手方で検索", "リアルタイムフィルタリング"],
            },
            Section {
                heading: "③ カードクリック",
                items: &[
                    "LNカードをクリックで詳細表示",
                    "証拠進捗・書類状況を確認",
                    "「詳細を見る」で展開",
                ],
            },
        ],
    },
    ScreenshotPage {
        title: "申立書作成（makeln）画面",
        image: "guide-screenshots/annotated-03-makeln.png",
        sections: [
            Section {
                heading: "① 種類選択",
                items: &["開示のみ", "開示＋消去禁止", "開示＋提供命令"],
            },
            Section {
                heading: "② パターン選択",
                items: &["著作権証明パターンを選択", "10種類のパターンから選択"],
            },
            Section {
                heading: "③ 作成実行",
                items: &["「📄 申立書を作成」をクリック", "PDF/Markdownでダウンロード"],
            },
        ],
    },
    ScreenshotPage {
        title: "マニュアル画面",
        image: "guide-screenshots/annotated-04-manual.png",
        sections: [
            Section {
                heading: "① タブ選択",
                items: &[
                    "はじめに / 証拠の集め方",
                    "LN確認 / 書類詰め",
                    "expert業務 / leader業務",
                ],
            },
            Section {
                heading: "② 項目展開",
                items: &["アコーディオン形式で展開", "手順や説明が表示される"],
            },
            Section {
                heading: "③ フィードバック",
                items: &["各項目に「📝 改善提案」ボタン", "マニュアルの改善を提案できる"],
            },
        ],
    },
    ScreenshotPage {
        title: "実績・レベル画面",
        image: "guide-screenshots/annotated-05-game.png",
        sections: [
            Section {
                heading: "① タブ切替",
                items: &[
                    "📊 マイページ: レベル・ポイント確認",
                    "📋 日次レポート: 本日の作業報告",
                    "🏆 リーダーボード: ランキング",
                ],
            },
            Section {
                heading: "② 作業入力",
                items: &["今日の作業内容を記入", "伝達事項を共有"],
            },
            Section {
                heading: "③ 送信",
                items: &["「送信」ボタンで保存", "自動的にポイント加算"],
            },
        ],
    },
];

pub const SUMMARY_TITLE: &str = "まとめ";
pub const SUMMARY_POINTS: [&str; 5] = [
    "✅ システムの基本操作を理解しましょう",
    "✅ 自分のロールに応じた業務を確認しましょう",
    "✅ マニュアルを活用して効率的に作業しましょう",
    "✅ 実績・レベルでモチベーションを維持しましょう",
    "✅ フィードバックでシステムを改善していきましょう",
];
pub const PORTAL_URL: &str = "https://todaizumi-itj.github.io/ln-public/lnportal.html";
