#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;

/// Serve a fixture site on an ephemeral port, returning its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fatsecret-test-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

pub fn login_page_html(button_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <form method="post" action="./Auth.aspx?pa=s">
    <input type="hidden" name="__VIEWSTATE" value="dDw0fixture" />
    <input type="hidden" name="__EVENTVALIDATION" value="evfixture" />
    <input type="text" name="ctl00$ctl12$Logincontrol1$Name" />
    <input type="password" name="ctl00$ctl12$Logincontrol1$Password" />
    <button class="signIn" onclick="__doPostBack('{button_id}','')">Entrar</button>
  </form>
</body>
</html>"#
    )
}

pub fn login_page_without_button() -> String {
    r#"<!DOCTYPE html>
<html>
<body>
  <form method="post" action="./Auth.aspx?pa=s">
    <input type="hidden" name="__VIEWSTATE" value="dDw0fixture" />
    <input type="hidden" name="__EVENTVALIDATION" value="evfixture" />
  </form>
</body>
</html>"#
        .to_string()
}

/// A diary page with one meal of two named rows plus a nameless totals row.
pub fn diary_page_html() -> String {
    r##"<!DOCTYPE html>
<html>
<body>
  <div class="MyFSHeaderFooterAdditional">
    <table class="foodsNutritionTbl">
      <tr><td>Gordura</td><td>Carbs</td><td>Prot</td><td>Cals</td></tr>
      <tr><td>(g)</td><td>(g)</td><td>(g)</td><td>(kcal)</td></tr>
      <tr>
        <td class="sub">55,20</td>
        <td class="sub">230,10</td>
        <td class="sub">98,40</td>
        <td class="sub">1.845</td>
      </tr>
    </table>
  </div>
  <div class="subtitle">quarta-feira, 26 de março de 2025</div>
  <div class="big">92%</div>
  <table class="generic foodsTbl">
    <tr><td>
      <table class="foodsNutritionTbl">
        <tr>
          <td class="greytitlex">Café da manhã</td>
          <td class="sub">10,50</td>
          <td class="sub">42,00</td>
          <td class="sub">18,30</td>
          <td class="sub">350</td>
        </tr>
      </table>
    </td></tr>
    <tr><td class="borderLeft borderRight">
      <table class="foodsNutritionTbl">
        <tr>
          <td><a href="#">Pão francês</a><div class="smallText">2 unidades</div></td>
          <td class="normal">3,10</td>
          <td class="normal">57,00</td>
          <td class="normal">9,20</td>
          <td class="normal">300</td>
        </tr>
      </table>
    </td></tr>
    <tr><td class="borderLeft borderRight">
      <table class="foodsNutritionTbl">
        <tr>
          <td><a href="#">Café com leite</a><div class="smallText">200 ml</div></td>
          <td class="normal">4,20</td>
          <td class="normal">9,80</td>
          <td class="normal">6,10</td>
          <td class="normal">104</td>
        </tr>
      </table>
    </td></tr>
    <tr><td class="borderLeft borderRight">
      <table class="foodsNutritionTbl">
        <tr>
          <td><div class="smallText">totais</div></td>
          <td class="normal">7,30</td>
          <td class="normal">66,80</td>
          <td class="normal">15,30</td>
          <td class="normal">404</td>
        </tr>
      </table>
    </td></tr>
  </table>
</body>
</html>"##
        .to_string()
}

/// A diary page that renders no data for the requested day.
pub fn empty_diary_page_html() -> String {
    r#"<!DOCTYPE html>
<html>
<body>
  <div class="big">0%</div>
</body>
</html>"#
        .to_string()
}
